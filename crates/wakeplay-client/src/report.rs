//! Result of one launch-and-play run.

use serde::Serialize;

use wakeplay_core::{Error, StepTrace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// Terminal status plus every step label recorded along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    pub fn success(trace: StepTrace) -> Self {
        Self {
            status: RunStatus::Success,
            steps: trace.into_steps(),
            error: None,
        }
    }

    pub fn failure(trace: StepTrace, error: &Error) -> Self {
        Self {
            status: RunStatus::Error,
            steps: trace.into_steps(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}
