use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date parsed from a `YYYY-MM-DD` form value.
///
/// The raw string is kept alongside the parsed date because the confirmation
/// email echoes exactly what the submitter typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDate {
    date: NaiveDate,
    raw: String,
}

impl SubmissionDate {
    pub fn parse(s: String) -> Result<SubmissionDate, String> {
        let parsed = if has_date_shape(&s) {
            NaiveDate::parse_from_str(&s, DATE_FORMAT).ok()
        } else {
            None
        };
        match parsed {
            Some(date) => Ok(Self { date, raw: s }),
            None => Err(format!(
                "{} is not a valid date. Use the YYYY-MM-DD format.",
                s
            )),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Four year digits, then one or two digits each for month and day.
/// chrono alone lets through padding, signs and short years.
fn has_date_shape(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => {
            year.len() == 4
                && (1..=2).contains(&month.len())
                && (1..=2).contains(&day.len())
                && s.bytes().all(|b| b.is_ascii_digit() || b == b'-')
        }
        _ => false,
    }
}

impl AsRef<str> for SubmissionDate {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
