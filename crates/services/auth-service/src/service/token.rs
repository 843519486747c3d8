//! Token issuer/validator.
//!
//! A stateless pair of operations over a shared signing key: `mint` builds
//! and signs a claim set, `verify` checks signature, issuer and expiry.
//! The key is created once at startup and held read-only for the process
//! lifetime, so tokens minted by any login validate against the same key.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::AppResult;
use domain::TOKEN_ISSUER;

/// Signed claim set carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the authenticated user's id
    pub sub: i64,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// A freshly minted token with its validity window.
#[derive(Debug, Clone)]
pub struct MintedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Process-lifetime signing key shared by issuer and validator.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenKeys {
    /// Build HS256 keys from the shared secret.
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Mint a token for a user, valid from now.
    pub fn mint(&self, user_id: i64) -> AppResult<MintedToken> {
        self.mint_at(user_id, Utc::now())
    }

    /// Mint a token with an explicit issue time.
    pub fn mint_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> AppResult<MintedToken> {
        let expires_at = issued_at + Duration::seconds(self.ttl_seconds);

        let claims = TokenClaims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(MintedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify signature, issuer and expiry, returning the claims.
    ///
    /// Validation relies on the signature and the claimed expiry alone;
    /// there is no re-serialize-and-compare step, which would be brittle
    /// to claim ordering.
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let data = decode::<TokenClaims>(token, &self.decoding, &validation)?;

        // The library accepts a token at exactly its expiry instant; the
        // contract is that now >= exp rejects.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::ExpiredSignature,
            )
            .into());
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret-key-for-testing-only-32chars", 100)
    }

    #[test]
    fn test_mint_then_verify() {
        let keys = keys();
        let minted = keys.mint(42).unwrap();

        let claims = keys.verify(&minted.token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 100);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let minted = keys
            .mint_at(42, Utc::now() - Duration::seconds(101))
            .unwrap();

        assert!(keys.verify(&minted.token).is_err());
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let keys = keys();
        // Issued 50s ago with a 100s window: still inside the window
        let minted = keys.mint_at(42, Utc::now() - Duration::seconds(50)).unwrap();

        assert!(keys.verify(&minted.token).is_ok());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let keys = keys();
        let other = TokenKeys::new(b"another-secret-key-of-32-characters!", 100);

        let minted = other.mint(42).unwrap();
        assert!(keys.verify(&minted.token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let keys = keys();
        let minted = keys.mint(42).unwrap();

        let mut tampered = minted.token.clone();
        tampered.pop();
        assert!(keys.verify(&tampered).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(keys().verify("not-a-token").is_err());
    }
}
