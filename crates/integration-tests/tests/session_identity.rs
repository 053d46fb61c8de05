//! Integration tests for the session-backed identity store.
//!
//! Covers the login/logout lifecycle, re-normalization of persisted role
//! labels, and silent recovery from corrupt persisted state.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use electrohub_core::{Identity, Role, UserId};
use electrohub_integration_tests::{memory_store, new_session, save_and_reopen};
use electrohub_storefront::middleware::{clear_session, establish_session, restore_identity};
use electrohub_storefront::models::session_keys;
use electrohub_storefront::routes::cart::{load_cart, save_cart};

fn test_identity(role: Role) -> Identity {
    Identity {
        id: UserId::new(7),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        role,
    }
}

#[tokio::test]
async fn test_login_survives_reopened_session() {
    let store = memory_store();
    let session = new_session(&store);

    establish_session(&session, &test_identity(Role::Client), "tok-123")
        .await
        .unwrap();

    let reopened = save_and_reopen(&session, &store).await;
    let auth = restore_identity(&reopened).await.expect("should restore");
    assert_eq!(auth.identity.id, UserId::new(7));
    assert_eq!(auth.identity.role, Role::Client);
    assert_eq!(auth.token, "tok-123");
}

#[tokio::test]
async fn test_missing_token_counts_as_logged_out() {
    let store = memory_store();
    let session = new_session(&store);

    session
        .insert(session_keys::USER, test_identity(Role::Client))
        .await
        .unwrap();

    assert!(restore_identity(&session).await.is_none());
}

#[tokio::test]
async fn test_raw_role_label_renormalizes_on_restore() {
    let store = memory_store();
    let session = new_session(&store);

    // A persisted identity from an older build that stored the raw
    // upstream label instead of the canonical one.
    session
        .insert(
            session_keys::USER,
            json!({"id": 7, "name": "Ana", "email": "ana@example.com", "role": "Vendedor"}),
        )
        .await
        .unwrap();
    session
        .insert(session_keys::TOKEN, "tok-123")
        .await
        .unwrap();

    let reopened = save_and_reopen(&session, &store).await;
    let auth = restore_identity(&reopened).await.expect("should restore");
    assert_eq!(auth.identity.role, Role::Vendor);
}

#[tokio::test]
async fn test_unrecognized_role_label_downgrades_to_client() {
    let store = memory_store();
    let session = new_session(&store);

    session
        .insert(
            session_keys::USER,
            json!({"id": 7, "name": "Ana", "email": "ana@example.com", "role": "superuser"}),
        )
        .await
        .unwrap();
    session
        .insert(session_keys::TOKEN, "tok-123")
        .await
        .unwrap();

    let auth = restore_identity(&session).await.expect("should restore");
    assert_eq!(auth.identity.role, Role::Client);
}

#[tokio::test]
async fn test_corrupt_identity_discards_both_auth_keys() {
    let store = memory_store();
    let session = new_session(&store);

    // Not an identity record at all.
    session.insert(session_keys::USER, 42).await.unwrap();
    session
        .insert(session_keys::TOKEN, "tok-123")
        .await
        .unwrap();

    let reopened = save_and_reopen(&session, &store).await;
    assert!(restore_identity(&reopened).await.is_none());

    // The discard removed the token too, so a later read is a clean miss
    // rather than a dangling credential.
    let token: Option<String> = reopened.get(session_keys::TOKEN).await.unwrap();
    assert!(token.is_none());
}

#[tokio::test]
async fn test_garbage_string_identity_restores_clean() {
    let store = memory_store();
    let session = new_session(&store);

    session
        .insert(session_keys::USER, "not json")
        .await
        .unwrap();
    session
        .insert(session_keys::TOKEN, "tok-123")
        .await
        .unwrap();

    let reopened = save_and_reopen(&session, &store).await;
    assert!(restore_identity(&reopened).await.is_none());
}

#[tokio::test]
async fn test_logout_keeps_the_cart() {
    let store = memory_store();
    let session = new_session(&store);

    establish_session(&session, &test_identity(Role::Client), "tok-123")
        .await
        .unwrap();

    let mut cart = electrohub_core::Cart::new();
    cart.add(
        electrohub_core::ProductId::new(1),
        "Arduino Uno".to_string(),
        "18.50".parse().unwrap(),
        2,
    );
    save_cart(&session, &cart).await.unwrap();

    clear_session(&session).await.unwrap();

    let reopened = save_and_reopen(&session, &store).await;
    assert!(restore_identity(&reopened).await.is_none());

    let cart = load_cart(&reopened).await;
    assert_eq!(cart.item_count(), 2);
}
