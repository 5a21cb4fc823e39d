use async_trait::async_trait;
use diesel::{Connection, SqliteConnection};
use intake::configuration::get_configuration;
use intake::email::{Email, Notifier};
use intake::models::Submission;
use intake::startup::Application;
use intake::store::load_submissions;
use intake::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub text_content: String,
}

#[derive(Default)]
pub struct MockEmailClient {
    pub sent_emails: Mutex<Vec<SentEmail>>,
    unreachable: bool,
}

#[async_trait]
impl Email for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        text_content: &str,
    ) -> anyhow::Result<()> {
        if self.unreachable {
            anyhow::bail!("The mail server is unreachable.");
        }
        self.sent_emails.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            text_content: text_content.to_string(),
        });
        Ok(())
    }
}

pub enum Mail {
    Enabled,
    Unreachable,
    Disabled,
}

pub struct TestApp {
    pub address: String,
    pub db_connection: SqliteConnection,
    pub email_client: Arc<MockEmailClient>,
    pub api_client: reqwest::Client,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        // SQLite keeps the write-ahead log and shared memory next to the file.
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

impl TestApp {
    pub async fn post_form(&self, body: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_fields(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.address))
            .form(fields)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_index(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_index_html(&self) -> String {
        self.get_index().await.text().await.unwrap()
    }

    pub fn saved_submissions(&mut self) -> Vec<Submission> {
        load_submissions(&mut self.db_connection).expect("Failed to fetch saved submissions.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Mail::Enabled).await
}

pub async fn spawn_app_with(mail: Mail) -> TestApp {
    Lazy::force(&TRACING);

    let db_path = std::env::temp_dir().join(format!("intake-{}.db", Uuid::new_v4()));
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.database.url = db_path.to_string_lossy().into_owned();
        c
    };

    let email_client = Arc::new(MockEmailClient {
        sent_emails: Mutex::new(Vec::new()),
        unreachable: matches!(mail, Mail::Unreachable),
    });
    let notifier: Notifier = match mail {
        Mail::Disabled => None,
        Mail::Enabled | Mail::Unreachable => Some(email_client.clone() as Arc<dyn Email>),
    };

    let Application { server, mut port } = Application::build(&configuration, notifier)
        .await
        .expect("Failed to build the application.");
    let _ = tokio::spawn(server.launch());
    let port = port.get().await.expect("The server did not lift off.");

    // The schema exists by now: it is created while the server ignites.
    let db_connection = SqliteConnection::establish(&configuration.database.url)
        .expect("Failed to connect to SQLite.");

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_connection,
        email_client,
        api_client,
        db_path,
    }
}
