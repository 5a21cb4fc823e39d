/// Surrogate key assigned by the store when a submission is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(i32);

impl SubmissionId {
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for SubmissionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
