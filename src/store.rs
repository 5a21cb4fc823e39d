use crate::domain::{NewSubmission, SubmissionId};
use crate::models::{NewSubmissionRow, Submission};
use crate::schema::submissions;
use anyhow::anyhow;
use diesel::connection::SimpleConnection;
use diesel::{ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT_MILLISECONDS: u32 = 5000;

/// Creates the submissions table if it does not exist yet.
///
/// Safe to call on every startup: applied migrations are skipped and the
/// table DDL is `CREATE TABLE IF NOT EXISTS`, so existing rows survive.
#[tracing::instrument(name = "Creating the submission schema", skip(conn))]
pub fn create_schema(conn: &mut SqliteConnection) -> Result<(), anyhow::Error> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            tracing::info!(applied = applied.len(), "Submission schema is up to date");
        })
        .map_err(|e| anyhow!("Failed to run pending migrations: {}", e))
}

#[tracing::instrument(
    name = "Saving new submission details in the database",
    skip(conn, new_submission)
)]
pub fn insert_submission(
    conn: &mut SqliteConnection,
    new_submission: &NewSubmission,
) -> QueryResult<SubmissionId> {
    set_busy_timeout(conn)?;
    diesel::insert_into(submissions::table)
        .values(NewSubmissionRow::from(new_submission))
        .returning(submissions::id)
        .get_result::<i32>(conn)
        .map(SubmissionId::from)
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })
}

/// Raises the connection's busy timeout so concurrent writers queue up.
///
/// Runs before each write: the pool acquires connections through its own
/// customizer (1 s busy timeout) and offers no hook to change it. The pragma
/// only touches connection state, so repeating it costs no I/O.
fn set_busy_timeout(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(&format!(
        "PRAGMA busy_timeout = {};",
        BUSY_TIMEOUT_MILLISECONDS
    ))
}

/// Every stored submission, oldest first. Not reachable over HTTP.
pub fn load_submissions(conn: &mut SqliteConnection) -> QueryResult<Vec<Submission>> {
    submissions::table
        .order(submissions::id.asc())
        .load::<Submission>(conn)
}
