// src/report/mod.rs

//! Digest rendering and SMTP delivery.
//!
//! The digest is a plain-text email: one block per job, newest first,
//! or a fixed placeholder line when nothing matched. Delivery goes
//! through a blocking SMTP transport on a worker thread; a send
//! failure fails the run, the snapshot on disk is already written by
//! then.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{AppError, Result};
use crate::models::{JobRecord, Secrets};

/// Subject line for a digest covering `count` jobs.
pub fn digest_subject(count: usize, lookback_hours: i64) -> String {
    format!("Job digest: {count} new matches (last {lookback_hours}h)")
}

/// Render the full plain-text body.
pub fn digest_body(jobs: &[JobRecord], lookback_hours: i64) -> String {
    if jobs.is_empty() {
        return format!("No new matching jobs in the last {lookback_hours} hours.");
    }

    let blocks: Vec<String> = jobs.iter().map(JobRecord::digest_block).collect();
    format!(
        "Found {} matching jobs in the last {} hours:\n\n{}",
        jobs.len(),
        lookback_hours,
        blocks.join("\n\n")
    )
}

/// SMTP digest sender.
pub struct Mailer {
    to_email: String,
    smtp_user: String,
    smtp_password: String,
    smtp_server: String,
}

impl Mailer {
    /// Build a mailer from environment secrets.
    ///
    /// Fails with a config error when any credential is missing, the
    /// same condition [`Secrets::require_mailer`] checks up front.
    pub fn from_secrets(secrets: &Secrets) -> Result<Self> {
        let to_email = secrets
            .to_email
            .clone()
            .ok_or_else(|| AppError::config("TO_EMAIL is not set"))?;
        let smtp_user = secrets
            .smtp_user
            .clone()
            .ok_or_else(|| AppError::config("SMTP_USER is not set"))?;
        let smtp_password = secrets
            .smtp_password
            .clone()
            .ok_or_else(|| AppError::config("SMTP_PASSWORD is not set"))?;

        Ok(Self {
            to_email,
            smtp_user,
            smtp_password,
            smtp_server: secrets.smtp_server.clone(),
        })
    }

    /// Send the digest for this run's jobs.
    pub async fn send_digest(&self, jobs: &[JobRecord], lookback_hours: i64) -> Result<()> {
        let subject = digest_subject(jobs.len(), lookback_hours);
        let body = digest_body(jobs, lookback_hours);

        let from = self.smtp_user.clone();
        let to = self.to_email.clone();
        let server = self.smtp_server.clone();
        let creds = Credentials::new(self.smtp_user.clone(), self.smtp_password.clone());

        let send_result = tokio::task::spawn_blocking(move || -> Result<()> {
            let message = Message::builder()
                .from(
                    from.parse()
                        .map_err(|e| AppError::mail(format!("invalid sender address: {e}")))?,
                )
                .to(to
                    .parse()
                    .map_err(|e| AppError::mail(format!("invalid recipient address: {e}")))?)
                .subject(subject)
                .header(ContentType::TEXT_PLAIN)
                .body(body)
                .map_err(|e| AppError::mail(format!("failed to build message: {e}")))?;

            let transport = SmtpTransport::relay(&server)
                .map_err(|e| AppError::mail(format!("SMTP relay setup failed: {e}")))?
                .credentials(creds)
                .build();

            transport
                .send(&message)
                .map_err(|e| AppError::mail(format!("SMTP send failed: {e}")))?;
            Ok(())
        })
        .await;

        match send_result {
            Ok(result) => result,
            Err(e) => Err(AppError::mail(format!("mail task failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, posted_at: Option<&str>) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: "https://example.com/1".to_string(),
            posted_at: posted_at.map(str::to_string),
            source: "remotive".to_string(),
        }
    }

    #[test]
    fn subject_names_count_and_window() {
        assert_eq!(
            digest_subject(4, 72),
            "Job digest: 4 new matches (last 72h)"
        );
    }

    #[test]
    fn body_lists_one_block_per_job() {
        let jobs = vec![
            job("Data Analyst", Some("2026-08-05T10:00:00+00:00")),
            job("SQL Developer", None),
        ];
        let body = digest_body(&jobs, 72);

        assert!(body.starts_with("Found 2 matching jobs in the last 72 hours:"));
        assert!(body.contains("Data Analyst"));
        assert!(body.contains("SQL Developer"));
        assert!(body.contains("Posted: unknown"));
    }

    #[test]
    fn empty_digest_uses_placeholder() {
        assert_eq!(
            digest_body(&[], 48),
            "No new matching jobs in the last 48 hours."
        );
    }

    #[test]
    fn from_secrets_rejects_missing_credentials() {
        let secrets = Secrets {
            to_email: Some("inbox@example.com".to_string()),
            smtp_server: "smtp.gmail.com".to_string(),
            ..Secrets::default()
        };
        assert!(Mailer::from_secrets(&secrets).is_err());
    }

    #[test]
    fn from_secrets_accepts_full_credentials() {
        let secrets = Secrets {
            to_email: Some("inbox@example.com".to_string()),
            smtp_user: Some("sender@example.com".to_string()),
            smtp_password: Some("app-password".to_string()),
            smtp_server: "smtp.gmail.com".to_string(),
            ..Secrets::default()
        };
        assert!(Mailer::from_secrets(&secrets).is_ok());
    }
}
