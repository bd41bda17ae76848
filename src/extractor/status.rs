use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Outcome of a run as reported to the user. A run that copied nothing is a
/// failure even when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStatus {
    Success { files_copied: usize },
    Failure,
}

impl FinalStatus {
    pub fn from_count(files_copied: usize) -> Self {
        if files_copied > 0 {
            FinalStatus::Success { files_copied }
        } else {
            FinalStatus::Failure
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FinalStatus::Success { .. })
    }

    pub fn files_copied(&self) -> usize {
        match self {
            FinalStatus::Success { files_copied } => *files_copied,
            FinalStatus::Failure => 0,
        }
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalStatus::Success { files_copied } => write!(
                f,
                "Operation Successful.\nTotal Number of Files Copied: {}",
                files_copied
            ),
            FinalStatus::Failure => write!(f, "Operation Failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub extension: String,
    pub files_copied: usize,
    pub bytes_copied: u64,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl ExtractionSummary {
    pub fn status(&self) -> FinalStatus {
        FinalStatus::from_count(self.files_copied)
    }
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
