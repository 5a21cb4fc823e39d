use crate::domain::{NewSubmission, SubmissionDate};
use crate::email::{Email, Notifier};
use crate::page::{self, Notice};
use crate::routes::error_chain_fmt;
use crate::startup::IntakeDbConn;
use crate::store::insert_submission;
use rocket::form::Form;
use rocket::http::Status;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect, Responder};
use rocket::{Request, Response, State};
use uuid::Uuid;

pub const CONFIRMATION_SUBJECT: &str = "New Form Submission";

// Fields are optional so that a missing key surfaces as a validation error
// naming the field instead of a bare 422.
#[derive(FromForm)]
pub struct FormData {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    date: Option<String>,
    occupation: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value.ok_or_else(|| format!("Missing field `{}`.", field))
}

impl TryFrom<FormData> for NewSubmission {
    type Error = String;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        let first_name = required(form.first_name, "first_name")?;
        let last_name = required(form.last_name, "last_name")?;
        let email = required(form.email, "email")?;
        let date = SubmissionDate::parse(required(form.date, "date")?)?;
        let occupation = required(form.occupation, "occupation")?;
        Ok(NewSubmission {
            first_name,
            last_name,
            email,
            date,
            occupation,
        })
    }
}

#[get("/")]
pub fn index(flash: Option<FlashMessage<'_>>) -> RawHtml<String> {
    let notice = flash.as_ref().map(|flash| Notice {
        kind: flash.kind(),
        message: flash.message(),
    });
    RawHtml(page::render(notice))
}

#[tracing::instrument(
    name = "Handling a form submission",
    skip(form, conn, notifier),
    fields(
        request_id = %Uuid::new_v4(),
        submitter_email = ?form.email,
        submitter_first_name = ?form.first_name
    )
)]
#[post("/", data = "<form>")]
pub async fn submit(
    form: Form<FormData>,
    conn: IntakeDbConn,
    notifier: &State<Notifier>,
) -> Result<Flash<Redirect>, SubmitError> {
    let new_submission: NewSubmission = form
        .into_inner()
        .try_into()
        .map_err(SubmitError::ValidationError)?;

    let record = new_submission.clone();
    let submission_id = conn
        .run(move |c| insert_submission(c, &record))
        .await
        .map_err(SubmitError::PersistenceError)?;
    tracing::info!(%submission_id, "Stored a new submission");

    if let Some(email_client) = notifier.inner() {
        // The row is already durable; a lost confirmation does not undo it.
        if let Err(e) = send_confirmation_email(email_client.as_ref(), &new_submission).await {
            tracing::error!(
                error.cause_chain = ?e,
                %submission_id,
                "Failed to send a confirmation email"
            );
        }
    }

    Ok(Flash::success(
        Redirect::to("/"),
        format!(
            "{}, Your form was submitted successfully!",
            new_submission.first_name
        ),
    ))
}

pub fn confirmation_body(new_submission: &NewSubmission) -> String {
    format!(
        "Thank you for your submission, {}.\n\
        Here are your data:\n\
        {}\n\
        {}\n\
        {}\n\
        Thank you!",
        new_submission.first_name,
        new_submission.first_name,
        new_submission.last_name,
        new_submission.date.as_ref()
    )
}

#[tracing::instrument(
    name = "Send a confirmation email to a new submitter",
    skip(email_client, new_submission)
)]
async fn send_confirmation_email(
    email_client: &dyn Email,
    new_submission: &NewSubmission,
) -> anyhow::Result<()> {
    email_client
        .send_email(
            &new_submission.email,
            CONFIRMATION_SUBJECT,
            &confirmation_body(new_submission),
        )
        .await
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to store the submission in the database.")]
    PersistenceError(#[source] diesel::result::Error),
}

impl std::fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for SubmitError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("SubmitError: {:?}", self);
        let (status, message) = match &self {
            SubmitError::ValidationError(message) => (Status::BadRequest, message.as_str()),
            SubmitError::PersistenceError(_) => (
                Status::InternalServerError,
                "Your submission could not be saved. Please try again later.",
            ),
        };
        let body = RawHtml(page::render(Some(Notice::error(message))));
        Response::build_from(body.respond_to(request)?)
            .status(status)
            .ok()
    }
}
