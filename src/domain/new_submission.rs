use crate::domain::SubmissionDate;

/// A validated form submission that has not been stored yet.
///
/// Text fields are kept verbatim; only the date is checked.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: SubmissionDate,
    pub occupation: String,
}
