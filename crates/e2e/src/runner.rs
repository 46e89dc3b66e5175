//! Suite runner: pre-flight, ordered scenario execution, reporting

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::browser::Session;
use crate::config::{timeouts, RunnerConfig};
use crate::context::ScenarioContext;
use crate::error::{E2eError, E2eResult};
use crate::poll::poll_until;
use crate::scenarios::{self, Scenario, World};
use crate::soft::{KnownIssue, SoftAssert, SoftFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    /// A precondition from an upstream scenario was never produced; the
    /// upstream failure is the one that matters.
    Skipped,
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub index: u32,
    pub name: String,
    pub status: Status,
    pub duration_ms: u64,
    pub soft_failures: Vec<SoftFailure>,
    pub known_issues: Vec<KnownIssue>,
    pub error: Option<String>,
    pub screenshot: Option<PathBuf>,
}

/// Result of the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn summarize(results: Vec<ScenarioResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.status == Status::Passed).count();
        let failed = results.iter().filter(|r| r.status == Status::Failed).count();
        let skipped = results.iter().filter(|r| r.status == Status::Skipped).count();
        Self {
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }
}

/// Keep scenarios matching the configured filters, preserving run order.
pub fn select(
    scenarios: Vec<Scenario>,
    name: Option<&str>,
    tag: Option<&str>,
) -> Vec<Scenario> {
    scenarios
        .into_iter()
        .filter(|s| name.map_or(true, |n| s.name == n))
        .filter(|s| tag.map_or(true, |t| s.tags.iter().any(|candidate| *candidate == t)))
        .collect()
}

pub struct SuiteRunner {
    config: RunnerConfig,
}

impl SuiteRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Probe the ERP before spending a browser launch on an unreachable
    /// target.
    async fn preflight(&self) -> E2eResult<()> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()?;
        let url = self.config.target.base_url.clone();

        let client = &client;
        let url = &url;
        poll_until(
            "ERP reachable",
            timeouts::POLL_INTERVAL,
            timeouts::PREFLIGHT,
            move || async move {
                match client.get(url.as_str()).send().await {
                    Ok(resp) if resp.status().is_success() => Ok(true),
                    Ok(resp) => {
                        warn!(status = %resp.status(), "ERP responded unhealthy");
                        Ok(false)
                    }
                    Err(_) => Ok(false),
                }
            },
        )
        .await
        .map_err(|_| E2eError::Target(format!("{url} did not become reachable")))
    }

    /// Run the (filtered) runbook strictly in index order.
    pub async fn run(&self) -> E2eResult<SuiteResult> {
        let start = Instant::now();

        self.preflight().await?;

        let session = Session::start(&self.config.target).await?;
        let tab = session.open_tab(&self.config.target.base_url).await?;
        tab.login(&self.config.target).await?;

        let mut world = World {
            cfg: self.config.target.clone(),
            session,
            tab,
            ctx: ScenarioContext::new(),
            soft: SoftAssert::new(),
        };

        let selected = select(
            scenarios::all(),
            self.config.name_filter.as_deref(),
            self.config.tag_filter.as_deref(),
        );
        info!("Running {} scenario(s)...", selected.len());

        let mut results = Vec::new();
        for scenario in &selected {
            let t0 = Instant::now();
            let outcome = (scenario.run)(&mut world).await;
            let duration_ms = t0.elapsed().as_millis() as u64;

            let (soft_failures, known_issues) = world.soft.drain();
            let mut result = ScenarioResult {
                index: scenario.index,
                name: scenario.name.to_string(),
                status: Status::Passed,
                duration_ms,
                soft_failures,
                known_issues,
                error: None,
                screenshot: None,
            };

            match outcome {
                Ok(()) if result.soft_failures.is_empty() => {
                    info!("✓ {} ({} ms)", scenario.name, duration_ms);
                }
                Ok(()) => {
                    result.status = Status::Failed;
                    error!(
                        "✗ {} - {} soft assertion(s) failed",
                        scenario.name,
                        result.soft_failures.len()
                    );
                }
                Err(e) if e.is_missing_precondition() => {
                    result.status = Status::Skipped;
                    result.error = Some(e.to_string());
                    warn!("- {} skipped: {}", scenario.name, e);
                }
                Err(e) => {
                    result.status = Status::Failed;
                    result.error = Some(e.to_string());
                    error!("✗ {} - {}", scenario.name, e);
                }
            }

            if result.status == Status::Failed {
                result.screenshot = self.capture_failure(&world, scenario).await;
            }
            results.push(result);
        }

        let World { session, .. } = world;
        session.shutdown().await;

        let duration_ms = start.elapsed().as_millis() as u64;
        let suite = SuiteResult::summarize(results, duration_ms);
        info!(
            "Results: {} passed, {} failed, {} skipped ({} ms)",
            suite.passed, suite.failed, suite.skipped, suite.duration_ms
        );
        Ok(suite)
    }

    /// Screenshot of the primary tab at the moment a scenario failed.
    async fn capture_failure(&self, world: &World, scenario: &Scenario) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.config.screenshot_dir) {
            warn!("could not create screenshot dir: {}", e);
            return None;
        }
        let path = self
            .config
            .screenshot_dir
            .join(format!("{:02}-{}.png", scenario.index, scenario.name));
        match world.tab.screenshot_png(&path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("screenshot failed for {}: {}", scenario.name, e);
                None
            }
        }
    }

    /// Write the suite result as pretty JSON into the output dir.
    pub fn write_results(&self, suite: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(suite)?;
        std::fs::write(&path, json)?;
        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;

    fn result(index: u32, status: Status) -> ScenarioResult {
        ScenarioResult {
            index,
            name: format!("scenario-{index}"),
            status,
            duration_ms: 1,
            soft_failures: vec![],
            known_issues: vec![],
            error: None,
            screenshot: None,
        }
    }

    #[test]
    fn summarize_counts_each_status() {
        let suite = SuiteResult::summarize(
            vec![
                result(0, Status::Passed),
                result(1, Status::Failed),
                result(2, Status::Skipped),
                result(3, Status::Passed),
            ],
            10,
        );
        assert_eq!(suite.total, 4);
        assert_eq!(suite.passed, 2);
        assert_eq!(suite.failed, 1);
        assert_eq!(suite.skipped, 1);
    }

    #[test]
    fn select_by_name_keeps_one() {
        let picked = select(scenarios::all(), Some("create-product"), None);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].index, 1);
    }

    #[test]
    fn select_by_tag_preserves_order() {
        let picked = select(scenarios::all(), None, Some("cleanup"));
        let indices: Vec<u32> = picked.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 11, 12, 13]);
    }

    #[test]
    fn select_without_filters_keeps_everything() {
        assert_eq!(select(scenarios::all(), None, None).len(), 14);
    }

    #[test]
    fn results_round_trip_as_json() {
        let suite = SuiteResult::summarize(vec![result(0, Status::Passed)], 5);
        let json = serde_json::to_string(&suite).unwrap();
        let back: SuiteResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.passed, 1);
        assert_eq!(back.results[0].name, "scenario-0");
    }

    #[test]
    fn write_results_creates_the_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = SuiteRunner::new(RunnerConfig {
            target: TargetConfig::default(),
            output_dir: tmp.path().join("nested/results"),
            screenshot_dir: tmp.path().join("nested/shots"),
            name_filter: None,
            tag_filter: None,
        });
        let suite = SuiteResult::summarize(vec![], 0);
        let path = runner.write_results(&suite).unwrap();
        assert!(path.exists());
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"total\": 0"));
    }
}
