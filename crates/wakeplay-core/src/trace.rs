//! Ordered record of the steps taken by one orchestration run.

use serde::Serialize;
use tracing::info;

/// Human-readable step labels in the order they happened.
///
/// Every label is also emitted as an `info` event so the trace shows up in
/// the log even when nobody reads the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepTrace {
    steps: Vec<String>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        info!(step = %label, "step");
        self.steps.push(label);
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }

    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the trace ends with exactly `tail`.
    pub fn ends_with(&self, tail: &[&str]) -> bool {
        tail.len() <= self.steps.len()
            && self.steps[self.steps.len() - tail.len()..]
                .iter()
                .zip(tail)
                .all(|(a, b)| a == b)
    }

    /// Whether `label` appears anywhere in the trace.
    pub fn contains(&self, label: &str) -> bool {
        self.steps.iter().any(|s| s == label)
    }
}
