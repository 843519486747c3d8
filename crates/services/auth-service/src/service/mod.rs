//! Authentication business logic.

mod auth_service;
pub mod token;

pub use auth_service::{AuthService, Authenticator};
pub use token::{MintedToken, TokenClaims, TokenKeys};
