//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with in-memory store)
//! 3. Auth extractors (per-route, not a layer)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAdmin, RequireAuth, RequireClient, RequireVendor, clear_session,
    establish_session, restore_identity,
};
pub use session::create_session_layer;
