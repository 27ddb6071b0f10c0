//! Verification email delivery.
//!
//! Delivery is best-effort: registration succeeds even when the email cannot
//! be sent, and the failure is only logged. With mail disabled (the default
//! in development), the verification link is logged instead.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::MailConfig;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the account-verification email for a freshly registered user.
    async fn send_verification(&self, to: &str, full_name: &str, token: &str) -> Result<()>;
}

/// Builds the mailer selected by configuration.
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        Ok(Arc::new(NoopMailer {
            base_url: config.base_url.clone(),
        }))
    }
}

fn verification_link(base_url: &str, token: &str) -> String {
    format!(
        "{}/api/auth/verifikasi-email?token={}",
        base_url.trim_end_matches('/'),
        token
    )
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    base_url: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .context("Invalid SMTP host")?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(SmtpMailer {
            transport: builder.build(),
            from_address: config.from_address.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, full_name: &str, token: &str) -> Result<()> {
        let link = verification_link(&self.base_url, token);
        let body = format!(
            "Halo {full_name},\n\n\
             Terima kasih sudah mendaftar di Videobelajar.\n\
             Klik tautan berikut untuk verifikasi email kamu:\n\n{link}\n\n\
             Abaikan email ini jika kamu tidak merasa mendaftar."
        );

        let message = Message::builder()
            .from(self.from_address.parse().context("Invalid from address")?)
            .to(to.parse().context("Invalid recipient address")?)
            .subject("Verifikasi email Videobelajar")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build verification email")?;

        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;

        Ok(())
    }
}

/// Logs the verification link instead of sending anything.
pub struct NoopMailer {
    base_url: String,
}

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_verification(&self, to: &str, _full_name: &str, token: &str) -> Result<()> {
        info!(
            "Mail disabled; verification link for {}: {}",
            to,
            verification_link(&self.base_url, token)
        );
        Ok(())
    }
}
