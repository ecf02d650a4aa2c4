//! Console email provider for development and testing.

use crate::providers::{AuthFuture, EmailProvider};
use chrono::{DateTime, Utc};
use tracing::info;

/// Console email provider.
///
/// This provider logs emails to the console instead of sending them.
/// Used when no SMTP server is configured.
///
/// # Examples
///
/// ```ignore
/// use eventmaker_auth::providers::ConsoleEmailProvider;
///
/// let provider = ConsoleEmailProvider::new("EventMaker");
/// provider.send_magic_link(
///     "user@example.com",
///     "http://localhost:3000/api/auth/magic-link/verify?token=abc123",
///     Utc::now() + chrono::Duration::minutes(10),
/// ).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ConsoleEmailProvider {
    app_name: String,
}

impl ConsoleEmailProvider {
    /// Create a new console email provider.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for ConsoleEmailProvider {
    fn default() -> Self {
        Self::new("EventMaker")
    }
}

impl EmailProvider for ConsoleEmailProvider {
    fn send_magic_link<'a>(
        &'a self,
        to: &'a str,
        magic_link: &'a str,
        expires_at: DateTime<Utc>,
    ) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            let expires_minutes = (expires_at - Utc::now()).num_minutes();

            info!(
                to = %to,
                expires_in = %expires_minutes,
                "📧 Magic Link Email (Development Mode)"
            );
            println!("\n╔══════════════════════════════════════════════════════════════╗");
            println!("║                   MAGIC LINK EMAIL                           ║");
            println!("╠══════════════════════════════════════════════════════════════╣");
            println!("║ To: {to:<57}║");
            println!("║ Subject: Sign in to {:<41}║", self.app_name);
            println!("╠══════════════════════════════════════════════════════════════╣");
            println!("║ This link will expire in {expires_minutes} minutes.{:<23}║", "");
            println!("║                                                              ║");
            println!("║ {magic_link:<61}║");
            println!("╚══════════════════════════════════════════════════════════════╝\n");

            Ok(())
        })
    }
}
