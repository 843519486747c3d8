//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 100;

/// Issuer claim stamped into every token
pub const TOKEN_ISSUER: &str = "shop-auth";

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Name of the cookie carrying the auth token on login
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

// =============================================================================
// Catalog
// =============================================================================

/// Default search page size when the request omits one
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Upper bound on search page size
pub const MAX_PAGE_SIZE: u64 = 100;
