//! Account handlers.

mod sign_in;
mod sign_up;

pub use sign_in::{CredentialsCommand, SignInHandler, MIN_PASSWORD_LEN};
pub use sign_up::SignUpHandler;
