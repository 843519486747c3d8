//! Welcome notification side-channel.
//!
//! Signup dispatches a welcome email fire-and-forget; a failure here is
//! logged and never fails account creation. In development mode (no SMTP
//! configured) emails are logged instead of sent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Welcome email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeEmail {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content
    pub body: String,
}

impl WelcomeEmail {
    /// Build the welcome email for a new account
    pub fn for_signup(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: "Welcome to the shop".to_string(),
            body: "Thanks for signing up. Have a great shopping experience.".to_string(),
        }
    }
}

/// Mailer trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver an email
    async fn send(&self, email: &WelcomeEmail) -> AppResult<()>;
}

/// Email configuration from environment.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Mailer that logs deliveries; stands in for SMTP in development.
pub struct LogMailer {
    config: EmailConfig,
}

impl LogMailer {
    pub fn from_env() -> Self {
        Self {
            config: EmailConfig::from_env(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &WelcomeEmail) -> AppResult<()> {
        tracing::info!(
            to = %email.to,
            from = %self.config.smtp_from,
            subject = %email.subject,
            "Processing welcome email"
        );

        if !self.config.is_configured() {
            // Development mode: log the email instead of sending
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 From: {}\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                self.config.smtp_from,
                email.to,
                email.subject,
                email.body
            );
            return Ok(());
        }

        tracing::warn!(
            "SMTP is configured but no transport is installed; \
             logging the email instead of sending."
        );

        Ok(())
    }
}
