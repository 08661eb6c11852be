//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini model client and a scripted mock
//! - `auth` - Supabase token validation and account operations
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - sqlx-backed repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
