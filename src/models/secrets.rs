//! Environment-provided credentials and toggles.
//!
//! Everything secret or deployment-specific stays out of the config file:
//! SMTP credentials, the recipient address, per-source API keys, and the
//! dry-run switch.

use std::env;

use crate::error::{AppError, Result};

/// Secrets and switches read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Digest recipient address (`TO_EMAIL`)
    pub to_email: Option<String>,

    /// SMTP account user / sender address (`SMTP_USER`)
    pub smtp_user: Option<String>,

    /// SMTP account password (`SMTP_PASSWORD`)
    pub smtp_password: Option<String>,

    /// SMTP relay host (`SMTP_SERVER`, defaults to smtp.gmail.com)
    pub smtp_server: String,

    /// Skip the notification step while still writing the snapshot
    /// (`DRY_RUN=1`)
    pub dry_run: bool,

    /// Reed API key (`REED_API_KEY`); source disabled when absent
    pub reed_api_key: Option<String>,

    /// Jooble API key (`JOOBLE_API_KEY`); source disabled when absent
    pub jooble_api_key: Option<String>,
}

impl Secrets {
    /// Read all secrets from the environment.
    pub fn from_env() -> Self {
        Self {
            to_email: non_empty(env::var("TO_EMAIL").ok()),
            smtp_user: non_empty(env::var("SMTP_USER").ok()),
            smtp_password: non_empty(env::var("SMTP_PASSWORD").ok()),
            smtp_server: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            dry_run: env::var("DRY_RUN").map(|v| v == "1").unwrap_or(false),
            reed_api_key: non_empty(env::var("REED_API_KEY").ok()),
            jooble_api_key: non_empty(env::var("JOOBLE_API_KEY").ok()),
        }
    }

    /// Verify that everything required for sending the digest is present.
    ///
    /// Called before any fetch or snapshot work when notification is
    /// enabled, so a misconfigured run aborts without side effects.
    pub fn require_mailer(&self) -> Result<()> {
        if self.to_email.is_none() {
            return Err(AppError::config("TO_EMAIL is not set"));
        }
        if self.smtp_user.is_none() || self.smtp_password.is_none() {
            return Err(AppError::config(
                "SMTP_USER or SMTP_PASSWORD is not set; set DRY_RUN=1 to skip sending",
            ));
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
