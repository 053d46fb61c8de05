//! The shopping cart aggregate.
//!
//! A pure, synchronous value type: callers load it from wherever it is
//! persisted, mutate it through the operations here, and persist it back.
//! That two-step contract keeps the aggregate testable without any session
//! or storage machinery.
//!
//! Invariants:
//! - at most one line item per product id
//! - every line item has quantity >= 1 (a quantity driven to zero or below
//!   removes the line instead of leaving a zero-quantity row)
//! - insertion order is preserved; repeat adds keep the original position

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One entry in the cart, keyed by product id.
///
/// `name` and `price` are snapshots taken when the product was first added;
/// they are not re-synced against the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID (the cart key).
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of [`LineItem`]s, one per product id.
///
/// Serializes transparently as the item list, so the persisted layout is
/// `[{id, name, price, quantity}, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line for this product already exists, the quantity accumulates
    /// and the line keeps its position (the stored name/price snapshot wins
    /// over the arguments). Otherwise a new line is appended. Adding zero
    /// units is a no-op.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>, price: Decimal, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem {
                id,
                name: name.into(),
                price,
                quantity,
            });
        }
    }

    /// Remove the line for a product. No-op when absent.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Overwrite the quantity for a product.
    ///
    /// A quantity of zero or below is equivalent to [`Cart::remove`].
    /// No-op when the product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart. Used after a fully successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Recomputed on every call; never cached.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_accumulates_quantity_for_same_id() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 1);
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 2);

        assert_eq!(cart.len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.quantity, 3);
        assert_eq!(item.line_total(), dec("55.50"));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(2), "Resistor", dec("0.10"), 5);
        cart.add(ProductId::new(7), "ESP32", dec("9.99"), 1);
        cart.add(ProductId::new(2), "Resistor", dec("0.10"), 5);

        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 7]);
    }

    #[test]
    fn test_add_keeps_original_snapshot() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino Uno", dec("18.50"), 1);
        // Repeat add with a drifted name/price: the snapshot wins.
        cart.add(ProductId::new(1), "Arduino Uno R4", dec("21.00"), 1);

        let item = &cart.items()[0];
        assert_eq!(item.name, "Arduino Uno");
        assert_eq!(item.price, dec("18.50"));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 1);
        cart.remove(ProductId::new(99));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 3);
        cart.update_quantity(ProductId::new(1), 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_nonpositive_removes() {
        for quantity in [0, -1, -100] {
            let mut cart = Cart::new();
            cart.add(ProductId::new(1), "Arduino", dec("18.50"), 3);
            cart.update_quantity(ProductId::new(1), quantity);
            assert!(cart.is_empty(), "quantity {quantity} should remove the line");
        }
    }

    #[test]
    fn test_total_recomputes_after_mutation() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Breadboard", dec("10.00"), 2);
        cart.add(ProductId::new(2), "Jumper wires", dec("5.00"), 1);
        assert_eq!(cart.total(), dec("25.00"));

        cart.remove(ProductId::new(2));
        assert_eq!(cart.total(), dec("20.00"));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 2);
        cart.add(ProductId::new(2), "Sensor", dec("3.25"), 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(3), "Relay", dec("2.40"), 1);
        cart.add(ProductId::new(1), "Arduino", dec("18.50"), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);

        // Transparent layout: a plain array of line items.
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_corrupt_payload_fails_to_parse() {
        assert!(serde_json::from_str::<Cart>("not json").is_err());
        assert!(serde_json::from_str::<Cart>("{\"items\": 3}").is_err());
    }
}
