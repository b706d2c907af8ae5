//! Authentication services: JWT tokens, Argon2 hashing, reset tokens.

mod jwt;
mod password;
mod reset;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
pub use reset::{ResetToken, generate_reset_token, hash_reset_token};
