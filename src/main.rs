use intake::configuration::get_configuration;
use intake::email::{Email, Notifier, SmtpEmailClient};
use intake::startup::Application;
use intake::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let subscriber = get_subscriber("intake".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let notifier: Notifier = match &configuration.email_client {
        Some(settings) => {
            let client =
                SmtpEmailClient::new(settings).expect("Failed to build the email client.");
            tracing::info!(host = %settings.host, "Confirmation emails are enabled");
            Some(Arc::new(client) as Arc<dyn Email>)
        }
        None => {
            tracing::info!("No mail server configured, confirmation emails are disabled");
            None
        }
    };

    let application = Application::build(&configuration, notifier).await?;
    application.server.launch().await.map(|_| ())
}
