use crate::catchers::*;
use crate::configuration::Settings;
use crate::email::Notifier;
use crate::port_saver;
use crate::port_saver::Port;
use crate::routes::*;
use crate::store::create_schema;
use rocket::fairing::{self, AdHoc};
use rocket::figment::Figment;
use rocket::{Build, Ignite, Rocket};
use rocket_sync_db_pools::database;
use secrecy::ExposeSecret;

#[database("intake")]
pub struct IntakeDbConn(diesel::SqliteConnection);

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    /// Ignites the server without launching it. A `None` port in the
    /// settings binds a random one, reported through `port` at liftoff.
    pub async fn build(
        configuration: &Settings,
        notifier: Notifier,
    ) -> Result<Application, rocket::Error> {
        let (port_saver, port) = port_saver::create_pair();
        let server = rocket::custom(figment(configuration))
            .attach(port_saver)
            .attach(IntakeDbConn::fairing())
            .attach(AdHoc::try_on_ignite(
                "Submission Schema",
                create_schema_on_ignite,
            ))
            .manage(notifier)
            .mount("/", routes![index, submit, health_check])
            .register("/", catchers![unprocessable_entity_to_bad_request])
            .ignite()
            .await?;
        Ok(Application { server, port })
    }
}

fn figment(configuration: &Settings) -> Figment {
    let application = &configuration.application;
    let database = &configuration.database;
    rocket::Config::figment()
        .merge(("address", application.host))
        .merge(("port", application.port.unwrap_or(0)))
        .merge(("secret_key", application.secret_key.expose_secret().as_str()))
        .merge(("databases.intake.url", database.url.as_str()))
        .merge(("databases.intake.pool_size", database.pool_size))
}

async fn create_schema_on_ignite(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match IntakeDbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            tracing::error!("No database connection available to create the schema");
            return Err(rocket);
        }
    };
    match conn.run(|c| create_schema(c)).await {
        Ok(()) => Ok(rocket),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to create the submission schema");
            Err(rocket)
        }
    }
}
