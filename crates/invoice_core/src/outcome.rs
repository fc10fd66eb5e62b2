use std::fmt;

use crate::RunResult;

/// Classification of a finished run. Drives user-facing reporting only;
/// it has no effect on control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToDo,
    FullSuccess,
    PartialSuccess,
    TotalFailure,
}

impl RunResult {
    pub fn outcome(&self) -> RunOutcome {
        if self.total_candidates == 0 {
            RunOutcome::NothingToDo
        } else if self.downloaded_count == self.total_candidates {
            RunOutcome::FullSuccess
        } else if self.downloaded_count == 0 {
            RunOutcome::TotalFailure
        } else {
            RunOutcome::PartialSuccess
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::NothingToDo => write!(f, "nothing to do"),
            RunOutcome::FullSuccess => write!(f, "full success"),
            RunOutcome::PartialSuccess => write!(f, "partial success"),
            RunOutcome::TotalFailure => write!(f, "total failure"),
        }
    }
}
