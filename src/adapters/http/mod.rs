//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own dto/handlers/routes module; `router`
//! composes them into the application.

pub mod auth;
pub mod dialogue;
pub mod error;
pub mod middleware;
pub mod router;
pub mod stats;

pub use error::ErrorResponse;
pub use router::{build_router, AppState, RouterOptions};
