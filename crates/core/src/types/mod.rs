//! Shared newtype wrappers.

pub mod email;
pub mod id;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{ClientId, ProductId, SaleId, UserId, VendorId};
pub use role::Role;
