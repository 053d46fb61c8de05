//! Integration tests for the ElectroHub storefront.
//!
//! These tests exercise the session-backed stores (identity and cart)
//! against a real `tower-sessions` [`MemoryStore`], simulating the
//! load-on-request / persist-on-mutation cycle the handlers follow. No
//! running server or upstream API is required.
//!
//! Run with: `cargo test -p electrohub-integration-tests`

use std::sync::Arc;

use tower_sessions::{MemoryStore, Session};

/// Fresh in-memory session store shared across simulated requests.
#[must_use]
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::default())
}

/// A new session bound to `store`, as the session layer would hand a
/// first-time visitor.
#[must_use]
pub fn new_session(store: &Arc<MemoryStore>) -> Session {
    Session::new(None, store.clone(), None)
}

/// Flush `session` to its store and reopen it by id, simulating a
/// follow-up request from the same visitor.
///
/// # Panics
///
/// Panics if the session cannot be saved or has no id afterwards.
pub async fn save_and_reopen(session: &Session, store: &Arc<MemoryStore>) -> Session {
    session.save().await.expect("session should save");
    let id = session.id().expect("saved session should have an id");
    Session::new(Some(id), store.clone(), None)
}
