use crate::domain::NewSubmission;
use crate::schema::submissions;
use chrono::NaiveDate;
use diesel::{Insertable, Queryable};

#[derive(Queryable, Debug)]
pub struct Submission {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub occupation: String,
}

#[derive(Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmissionRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub date: NaiveDate,
    pub occupation: &'a str,
}

impl<'a> From<&'a NewSubmission> for NewSubmissionRow<'a> {
    fn from(submission: &'a NewSubmission) -> Self {
        Self {
            first_name: &submission.first_name,
            last_name: &submission.last_name,
            email: &submission.email,
            date: submission.date.date(),
            occupation: &submission.occupation,
        }
    }
}
