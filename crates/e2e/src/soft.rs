//! Soft assertions
//!
//! Nearly all business-data comparisons are soft: a mismatch is recorded
//! (optionally with a screenshot) and the scenario keeps going, so one run
//! surfaces as many discrepancies as possible. Only missing preconditions
//! and absent structural elements abort a scenario (see [`crate::error`]).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A recorded expected/actual mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftFailure {
    /// Where the comparison happened, e.g. `"order number on deficit page"`.
    pub context: String,
    pub expected: String,
    pub actual: String,
    /// Screenshot captured at failure time, if any.
    pub screenshot: Option<PathBuf>,
}

/// A discrepancy the suite knowingly tolerates in the SUT.
///
/// These observations are recorded for diagnostics on every run but never
/// count toward pass/fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownIssue {
    pub context: String,
    pub note: String,
    pub observed: String,
}

/// Collector threaded through a scenario.
#[derive(Debug, Default)]
pub struct SoftAssert {
    failures: Vec<SoftFailure>,
    known_issues: Vec<KnownIssue>,
}

impl SoftAssert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mismatch unless `expected == actual`. Returns whether the
    /// check passed so callers can chain follow-up reads.
    pub fn check_eq(&mut self, context: &str, expected: &str, actual: &str) -> bool {
        if expected == actual {
            return true;
        }
        warn!(context, expected, actual, "soft assertion failed");
        self.failures.push(SoftFailure {
            context: context.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            screenshot: None,
        });
        false
    }

    /// Attach a screenshot to the most recent failure.
    pub fn attach_screenshot(&mut self, path: PathBuf) {
        if let Some(last) = self.failures.last_mut() {
            last.screenshot = Some(path);
        }
    }

    /// Record an observation for a discrepancy the SUT is known for.
    pub fn known_issue(&mut self, context: &str, note: &str, observed: &str) {
        warn!(context, note, observed, "known issue observed");
        self.known_issues.push(KnownIssue {
            context: context.to_string(),
            note: note.to_string(),
            observed: observed.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[SoftFailure] {
        &self.failures
    }

    pub fn known_issues(&self) -> &[KnownIssue] {
        &self.known_issues
    }

    /// Drain everything recorded so far (the runner calls this between
    /// scenarios to fold results into the per-scenario report).
    pub fn drain(&mut self) -> (Vec<SoftFailure>, Vec<KnownIssue>) {
        (
            std::mem::take(&mut self.failures),
            std::mem::take(&mut self.known_issues),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_recorded_and_execution_continues() {
        let mut soft = SoftAssert::new();
        assert!(soft.check_eq("qty on list", "7", "7"));
        assert!(!soft.check_eq("qty in modal", "7", "5"));
        assert!(!soft.is_clean());
        assert_eq!(soft.failures().len(), 1);
        assert_eq!(soft.failures()[0].actual, "5");
    }

    #[test]
    fn known_issues_do_not_fail_the_scenario() {
        let mut soft = SoftAssert::new();
        soft.known_issue(
            "urgency date on list",
            "dates can differ by one day",
            "17.11.2025 vs 18.11.2025",
        );
        assert!(soft.is_clean());
        assert_eq!(soft.known_issues().len(), 1);
    }

    #[test]
    fn screenshot_attaches_to_last_failure() {
        let mut soft = SoftAssert::new();
        soft.check_eq("a", "1", "2");
        soft.attach_screenshot(PathBuf::from("shot.png"));
        assert_eq!(
            soft.failures()[0].screenshot.as_deref(),
            Some(std::path::Path::new("shot.png"))
        );
    }

    #[test]
    fn drain_resets_the_collector() {
        let mut soft = SoftAssert::new();
        soft.check_eq("a", "1", "2");
        let (failures, issues) = soft.drain();
        assert_eq!(failures.len(), 1);
        assert!(issues.is_empty());
        assert!(soft.is_clean());
    }
}
