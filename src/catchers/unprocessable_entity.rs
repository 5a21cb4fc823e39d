use crate::page::{self, Notice};
use rocket::response::content::RawHtml;
use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::Request;

/// Bodies Rocket cannot decode into a form are the submitter's fault.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(_req: &Request) -> BadRequest<RawHtml<String>> {
    status::BadRequest(RawHtml(page::render(Some(Notice::error(
        "The submitted form could not be read.",
    )))))
}
