use crate::configuration::EmailClientSettings;
use crate::email::Email;
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailClient {
    /// Builds the transport without connecting; the first send opens the
    /// session.
    pub fn new(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender = settings
            .sender()
            .with_context(|| format!("{} is not a valid sender address.", settings.username))?;
        let builder = if settings.require_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .context("Failed to configure STARTTLS for the mail server.")?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };
        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().clone(),
            ))
            .timeout(Some(settings.timeout()))
            .build();
        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Email for SmtpEmailClient {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        text_content: &str,
    ) -> anyhow::Result<()> {
        let recipient: Mailbox = recipient
            .parse()
            .with_context(|| format!("{} is not a valid recipient address.", recipient))?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(text_content.to_string())
            .context("Failed to build the email message.")?;

        self.transport
            .send(message)
            .await
            .context("The mail server did not accept the message.")?;
        Ok(())
    }
}
