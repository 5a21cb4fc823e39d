mod smtp_email_client;

use async_trait::async_trait;
pub use smtp_email_client::SmtpEmailClient;

#[async_trait]
pub trait Email: Send + Sync {
    /// Sends a plain-text message to a single recipient.
    ///
    /// The recipient is the raw address from the form; implementations
    /// reject it if it cannot be addressed.
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        text_content: &str,
    ) -> Result<(), anyhow::Error>;
}

/// Managed state for the form handler: `None` when mail is not configured.
pub type Notifier = Option<std::sync::Arc<dyn Email>>;
