//! Authentication service - signup, login, logout, token validation.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{Password, User};

use crate::infra::RevocationStore;
use crate::mailer::{Mailer, WelcomeEmail};
use crate::repository::UserRepository;
use crate::service::token::{MintedToken, TokenKeys};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account
    async fn signup(&self, email: String, password: String) -> AppResult<User>;

    /// Authenticate and mint a token
    async fn login(&self, email: String, password: String) -> AppResult<(User, MintedToken)>;

    /// Revoke a token. Logging out an already-invalid token is a
    /// successful no-op.
    async fn logout(&self, token: &str) -> AppResult<bool>;

    /// Verify a token and check it belongs to the given user.
    async fn validate_token(&self, token: &str, user_id: i64) -> AppResult<bool>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    revocations: Arc<dyn RevocationStore>,
    mailer: Arc<dyn Mailer>,
    tokens: Arc<TokenKeys>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        repo: Arc<dyn UserRepository>,
        revocations: Arc<dyn RevocationStore>,
        mailer: Arc<dyn Mailer>,
        tokens: Arc<TokenKeys>,
    ) -> Self {
        Self {
            repo,
            revocations,
            mailer,
            tokens,
        }
    }

    /// Dispatch the welcome notification without blocking signup.
    /// Delivery failure is logged, never propagated.
    fn dispatch_welcome_email(&self, to: &str) {
        let mailer = self.mailer.clone();
        let email = WelcomeEmail::for_signup(to);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&email).await {
                warn!(to = %email.to, error = %e, "Failed to send welcome email");
            }
        });
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, email: String, password: String) -> AppResult<User> {
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&password)
            .map_err(AppError::from)?
            .into_string();

        let user = self.repo.create(email, password_hash).await?;

        self.dispatch_welcome_email(&user.email);

        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<(User, MintedToken)> {
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::NotFound)?;

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        let minted = self.tokens.mint(user.id)?;
        Ok((user, minted))
    }

    async fn logout(&self, token: &str) -> AppResult<bool> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                // Invalid or expired tokens have nothing left to revoke
                debug!(error = %e, "Logout with invalid token");
                return Ok(true);
            }
        };

        let remaining = claims.exp - Utc::now().timestamp();
        self.revocations
            .revoke(claims.sub, claims.iat, remaining)
            .await?;

        Ok(true)
    }

    async fn validate_token(&self, token: &str, user_id: i64) -> AppResult<bool> {
        let claims = self.tokens.verify(token)?;

        if claims.sub != user_id {
            return Err(AppError::validation(
                "Token subject does not match the supplied user id",
            ));
        }

        if self.revocations.is_revoked(claims.sub, claims.iat).await? {
            return Err(AppError::validation("Token has been revoked"));
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockRevocationStore;
    use crate::mailer::MockMailer;
    use crate::repository::MockUserRepository;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    fn user_with_password(id: i64, email: &str, password: &str) -> User {
        let hash = Password::new(password).unwrap().into_string();
        User::new(id, email.to_string(), hash)
    }

    struct Fixture {
        repo: MockUserRepository,
        revocations: MockRevocationStore,
        mailer: MockMailer,
    }

    impl Fixture {
        fn new() -> Self {
            let mut mailer = MockMailer::new();
            mailer.expect_send().returning(|_| Ok(()));
            Self {
                repo: MockUserRepository::new(),
                revocations: MockRevocationStore::new(),
                mailer,
            }
        }

        fn build(self) -> Authenticator {
            Authenticator::new(
                Arc::new(self.repo),
                Arc::new(self.revocations),
                Arc::new(self.mailer),
                Arc::new(TokenKeys::new(SECRET, 100)),
            )
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let mut fx = Fixture::new();
        fx.repo.expect_find_by_email().returning(|_| Ok(None));
        fx.repo
            .expect_create()
            .returning(|email, hash| Ok(User::new(1, email, hash)));

        let user = fx
            .build()
            .signup("a@x.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert_ne!(user.password_hash, "password123");
        assert!(Password::from_hash(user.password_hash).verify("password123"));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflicts() {
        let mut fx = Fixture::new();
        fx.repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(1, "a@x.com", "password123"))));
        fx.repo.expect_create().times(0);

        let result = fx
            .build()
            .signup("a@x.com".to_string(), "password123".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let mut fx = Fixture::new();
        fx.repo.expect_find_by_email().returning(|_| Ok(None));
        fx.repo.expect_create().times(0);

        let result = fx
            .build()
            .signup("a@x.com".to_string(), "short".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signup_survives_mailer_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|email, hash| Ok(User::new(1, email, hash)));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .returning(|_| Err(AppError::internal("smtp down")));

        let service = Authenticator::new(
            Arc::new(repo),
            Arc::new(MockRevocationStore::new()),
            Arc::new(mailer),
            Arc::new(TokenKeys::new(SECRET, 100)),
        );

        let result = service
            .signup("a@x.com".to_string(), "password123".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let mut fx = Fixture::new();
        fx.repo.expect_find_by_email().returning(|_| Ok(None));

        let result = fx
            .build()
            .login("missing@x.com".to_string(), "password123".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_rejected() {
        let mut fx = Fixture::new();
        fx.repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(1, "a@x.com", "password123"))));

        let result = fx
            .build()
            .login("a@x.com".to_string(), "wrong-password".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_then_validate() {
        let mut fx = Fixture::new();
        fx.repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(7, "a@x.com", "password123"))));
        fx.revocations
            .expect_is_revoked()
            .returning(|_, _| Ok(false));

        let service = fx.build();
        let (user, minted) = service
            .login("a@x.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, 7);
        assert!(service.validate_token(&minted.token, 7).await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_rejects_subject_mismatch() {
        let mut fx = Fixture::new();
        fx.repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(7, "a@x.com", "password123"))));
        // The denylist is never consulted for a mismatched subject
        fx.revocations.expect_is_revoked().times(0);

        let service = fx.build();
        let (_, minted) = service
            .login("a@x.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        let result = service.validate_token(&minted.token, 8).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_validate_rejects_revoked_token() {
        let mut fx = Fixture::new();
        fx.repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(7, "a@x.com", "password123"))));
        fx.revocations.expect_is_revoked().returning(|_, _| Ok(true));

        let service = fx.build();
        let (_, minted) = service
            .login("a@x.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert!(service.validate_token(&minted.token, 7).await.is_err());
    }

    #[tokio::test]
    async fn test_validate_rejects_expired_token() {
        let mut fx = Fixture::new();
        fx.revocations.expect_is_revoked().times(0);

        let service = fx.build();
        let keys = TokenKeys::new(SECRET, 100);
        let minted = keys
            .mint_at(7, Utc::now() - chrono::Duration::seconds(101))
            .unwrap();

        assert!(service.validate_token(&minted.token, 7).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_revokes_remaining_lifetime() {
        let mut fx = Fixture::new();
        fx.revocations
            .expect_revoke()
            .withf(|_, _, ttl| *ttl > 0 && *ttl <= 100)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = fx.build();
        let minted = TokenKeys::new(SECRET, 100).mint(7).unwrap();

        assert!(service.logout(&minted.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_with_invalid_token_is_noop() {
        let mut fx = Fixture::new();
        fx.revocations.expect_revoke().times(0);

        let service = fx.build();
        assert!(service.logout("garbage-token").await.unwrap());
    }
}
