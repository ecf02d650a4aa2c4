//! SMTP email provider implementation using Lettre.

use crate::config::SmtpConfig;
use crate::error::{AuthError, Result};
use crate::providers::{AuthFuture, EmailProvider};
use chrono::{DateTime, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Port that expects TLS from the first byte rather than STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP email provider using Lettre.
///
/// This provider sends real emails via SMTP, suitable for production use.
/// Port 465 uses implicit TLS; every other port upgrades with STARTTLS.
///
/// # Examples
///
/// ```ignore
/// use eventmaker_auth::config::SmtpConfig;
/// use eventmaker_auth::providers::SmtpEmailProvider;
///
/// let provider = SmtpEmailProvider::new(SmtpConfig {
///     host: "smtp.example.com".to_string(),
///     port: 587,
///     username: "mailer".to_string(),
///     password: "app_password".to_string(),
///     from_email: "noreply@eventmaker.example.com".to_string(),
///     from_name: "EventMaker".to_string(),
/// })?;
/// ```
#[derive(Clone)]
pub struct SmtpEmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_name: String,
}

impl SmtpEmailProvider {
    /// Create a new SMTP email provider.
    ///
    /// The connection is opened lazily on first send.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if the relay host or sender
    /// address is invalid.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AuthError::ConfigurationError(format!("SMTP relay error: {e}")))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| AuthError::ConfigurationError(format!("Invalid from address: {e}")))?;

        Ok(Self {
            transport,
            from,
            app_name: config.from_name,
        })
    }

    fn build_message(&self, to: &str, magic_link: &str, expires_minutes: i64) -> Result<Message> {
        let subject = format!("Sign in to {}", self.app_name);
        let text_body = format!(
            "Sign in to {app}\n\n{magic_link}\n\nThis link expires in {expires_minutes} minutes. \
             If you did not request this email, you can safely ignore it.\n",
            app = self.app_name
        );
        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{subject}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">{subject}</h2>
        <p>Click the button below to sign in. This link will expire in {expires_minutes} minutes.</p>
        <p style="margin: 30px 0;">
            <a href="{magic_link}"
               style="display: inline-block; background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">
                Sign In
            </a>
        </p>
        <p style="color: #666; font-size: 14px;">
            If you didn't request this email, you can safely ignore it.
        </p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            Or copy and paste this link into your browser:<br>
            {magic_link}
        </p>
    </div>
</body>
</html>"#
        );

        Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| AuthError::EmailError(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text_body, html_body))
            .map_err(|e| AuthError::EmailError(format!("Failed to build email: {e}")))
    }
}

impl EmailProvider for SmtpEmailProvider {
    fn send_magic_link<'a>(
        &'a self,
        to: &'a str,
        magic_link: &'a str,
        expires_at: DateTime<Utc>,
    ) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            let expires_minutes = (expires_at - Utc::now()).num_minutes();
            let message = self.build_message(to, magic_link, expires_minutes)?;

            self.transport
                .send(message)
                .await
                .map_err(|e| AuthError::EmailError(format!("Failed to send email: {e}")))?;

            tracing::info!(to = %to, "Magic link email sent");
            Ok(())
        })
    }
}
