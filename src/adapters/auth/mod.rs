//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `IdentityProvider` ports:
//!
//! - `supabase` - Local HS256 validation of Supabase access tokens
//! - `identity` - Supabase Auth (GoTrue) password sign-in and sign-up
//! - `mock` - Test implementations that don't require external services

mod identity;
mod mock;
mod supabase;

pub use identity::{SupabaseIdentityConfig, SupabaseIdentityProvider};
pub use mock::{MockIdentityProvider, MockSessionValidator};
pub use supabase::{SupabaseJwtConfig, SupabaseSessionValidator, AUTHENTICATED_AUDIENCE};
