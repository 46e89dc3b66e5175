//! Configuration for the target ERP and the scenario runner

use std::path::PathBuf;

/// Shared per-action timeout table.
///
/// Every wait in the suite goes through one of these constants; no page
/// object or scenario carries its own inline duration.
pub mod timeouts {
    use std::time::Duration;

    /// Single element interaction (click, fill, read).
    pub const ACTION: Duration = Duration::from_secs(10);

    /// Full page navigation including document load.
    pub const NAVIGATION: Duration = Duration::from_secs(30);

    /// Modal dialog open/close.
    pub const MODAL: Duration = Duration::from_secs(10);

    /// Backend-asynchronous side effects (derived order variants, deficit
    /// recomputation after a save).
    pub const BACKEND_SETTLE: Duration = Duration::from_secs(45);

    /// Polling interval for all eventual-consistency loops.
    pub const POLL_INTERVAL: Duration = Duration::from_millis(300);

    /// Pre-flight reachability probe of the ERP itself.
    pub const PREFLIGHT: Duration = Duration::from_secs(30);
}

/// The live ERP instance under test.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Base URL of the ERP web application.
    pub base_url: String,

    /// Existing CDP endpoint to connect to. None = launch a local Chromium.
    pub cdp_url: Option<String>,

    /// Login credentials.
    pub username: String,
    pub password: String,

    /// Run the browser with a visible window (debugging).
    pub headful: bool,

    /// Viewport dimensions.
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            cdp_url: None,
            username: "qa".to_string(),
            password: "qa".to_string(),
            headful: false,
            viewport_width: 1600,
            viewport_height: 900,
        }
    }
}

impl TargetConfig {
    /// Build a config from the environment. `ERP_E2E_BASE_URL` is required
    /// by the harness entry; the rest fall back to defaults.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("ERP_E2E_BASE_URL").unwrap_or(default.base_url),
            cdp_url: std::env::var("ERP_E2E_CDP_URL").ok(),
            username: std::env::var("ERP_E2E_USER").unwrap_or(default.username),
            password: std::env::var("ERP_E2E_PASS").unwrap_or(default.password),
            headful: std::env::var("ERP_E2E_HEADFUL").map(|v| v == "1").unwrap_or(false),
            viewport_width: default.viewport_width,
            viewport_height: default.viewport_height,
        }
    }

    /// Absolute URL for a path within the ERP.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Configuration for the suite runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub target: TargetConfig,

    /// Directory for `suite-results.json`.
    pub output_dir: PathBuf,

    /// Directory for failure screenshots.
    pub screenshot_dir: PathBuf,

    /// Run only the scenario with this name.
    pub name_filter: Option<String>,

    /// Run only scenarios carrying this tag.
    pub tag_filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            output_dir: PathBuf::from("test-results"),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            name_filter: None,
            tag_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = TargetConfig {
            base_url: "http://erp.local:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(cfg.url("/shipments"), "http://erp.local:8080/shipments");
    }

    #[test]
    fn env_free_config_uses_defaults() {
        let cfg = TargetConfig::default();
        assert!(cfg.cdp_url.is_none());
        assert!(!cfg.headful);
        assert_eq!(cfg.viewport_width, 1600);
    }
}
