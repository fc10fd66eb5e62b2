use std::fmt;

use chrono::NaiveDate;

/// Portal login credentials, owned by the session for the life of one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of debug output and logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The cutoff date: documents issued on or before it are assumed downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark(NaiveDate);

impl Watermark {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Half-open filter: true iff `issued` is strictly after the watermark.
    /// The watermark date itself is excluded.
    pub fn selects(&self, issued: NaiveDate) -> bool {
        self.0 < issued
    }
}

/// A discovered, date-filtered, not-yet-downloaded document reference.
///
/// `row_index` is the record's 1-based position in the list view. Locators
/// are position-based, so the list view must be restored to its original
/// state before the index is dereferenced again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub issue_date: NaiveDate,
    pub row_index: usize,
    pub raw_label: String,
}

/// Final counts for one harvesting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub total_candidates: usize,
    pub downloaded_count: usize,
}
