mod new_submission;
mod submission_date;
mod submission_id;

pub use new_submission::NewSubmission;
pub use submission_date::SubmissionDate;
pub use submission_id::SubmissionId;
