//! # scribe-mail
//!
//! Outbound email capability for OTP delivery.
//!
//! The API treats mail as optional: [`SmtpMailer::from_env`] returns `None`
//! when SMTP is not configured, and the OTP flow degrades to a
//! check-the-server-logs response instead of failing. Delivery problems are
//! therefore reported as errors to the caller but must never block passcode
//! issuance.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use scribe_core::{Error, Result};

/// Delivery capability for one-time passcodes.
#[async_trait]
pub trait OtpMailer: Send + Sync {
    /// Email `code` to `to`. Failure is reported, not retried.
    async fn send_otp(&self, to: &str, code: &str) -> Result<()>;
}

/// SMTP-backed [`OtpMailer`] over a STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build a mailer from `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS`, and
    /// `SMTP_FROM`.
    ///
    /// Returns `None` unless host, user, and password are all present;
    /// `SMTP_FROM` defaults to the SMTP user.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok()?;
        let pass = std::env::var("SMTP_PASS").ok()?;
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| user.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .ok()?
            .credentials(Credentials::new(user, pass))
            .build();

        info!(
            subsystem = "mail",
            component = "smtp",
            op = "init",
            host = %host,
            "SMTP mailer configured"
        );
        Some(Self { transport, from })
    }

    /// Build a mailer against an explicit transport (tests, alternate relays).
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>, from: String) -> Self {
        Self { transport, from }
    }
}

#[async_trait]
impl OtpMailer for SmtpMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| Error::Mail(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| Error::Mail(format!("Invalid recipient address: {}", e)))?)
            .subject("Scribe OTP Verification")
            .header(ContentType::TEXT_PLAIN)
            .body(format!("Your Scribe OTP is: {}", code))
            .map_err(|e| Error::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;

        debug!(
            subsystem = "mail",
            component = "smtp",
            op = "send_otp",
            to = %to,
            "OTP email sent"
        );
        Ok(())
    }
}
