//! Persistent desk settings stored as TOML under the app directory.

mod errors;
mod io;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from_path, load_or_default, save, save_to_path};

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base URL the analytical backend listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

const MIN_TIMEOUT_SECS: u64 = 1;
const MIN_RESPONSE_BYTES: usize = 1024;

/// Aggregate settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub ui: UiDefaults,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How to reach, and optionally launch, the analytical backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Spawn the backend process alongside the window.
    #[serde(default = "default_true")]
    pub launch: bool,
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_script")]
    pub script: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory for the child; defaults to the script's parent.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// Bounded waits and response limits applied to every backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Solving can take minutes, so it gets its own budget.
    #[serde(default = "default_solve_timeout_secs")]
    pub solve_timeout_secs: u64,
    /// Maximum silence tolerated on the progress stream.
    #[serde(default = "default_progress_timeout_secs")]
    pub progress_timeout_secs: u64,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

/// Initial values for the solver and risk editor forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiDefaults {
    #[serde(default = "default_samples")]
    pub coefficient_samples: u32,
    #[serde(default = "default_samples")]
    pub discount_factor_samples: u32,
    #[serde(default = "default_min_budget")]
    pub min_budget: i64,
    #[serde(default = "default_max_budget")]
    pub max_budget: i64,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl AppConfig {
    /// Clamp values that would make the desk unusable.
    pub fn normalized(mut self) -> Self {
        let network = &mut self.network;
        network.request_timeout_secs = network.request_timeout_secs.max(MIN_TIMEOUT_SECS);
        network.solve_timeout_secs = network.solve_timeout_secs.max(MIN_TIMEOUT_SECS);
        network.progress_timeout_secs = network.progress_timeout_secs.max(MIN_TIMEOUT_SECS);
        network.max_response_bytes = network.max_response_bytes.max(MIN_RESPONSE_BYTES);
        let ui = &mut self.ui;
        ui.coefficient_samples = ui.coefficient_samples.max(1);
        ui.discount_factor_samples = ui.discount_factor_samples.max(1);
        ui.min_budget = ui.min_budget.max(0);
        ui.max_budget = ui.max_budget.max(ui.min_budget);
        if !self.backend.base_url.ends_with('/') {
            self.backend.base_url.push('/');
        }
        self.logging.max_files = self.logging.max_files.max(1);
        self
    }
}

impl NetworkSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn solve_timeout(&self) -> Duration {
        Duration::from_secs(self.solve_timeout_secs)
    }

    pub fn progress_timeout(&self) -> Duration {
        Duration::from_secs(self.progress_timeout_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            launch: true,
            program: default_program(),
            script: default_script(),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            solve_timeout_secs: default_solve_timeout_secs(),
            progress_timeout_secs: default_progress_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl Default for UiDefaults {
    fn default() -> Self {
        Self {
            coefficient_samples: default_samples(),
            discount_factor_samples: default_samples(),
            min_budget: default_min_budget(),
            max_budget: default_max_budget(),
            ratio: default_ratio(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_program() -> String {
    "python".to_string()
}

fn default_script() -> PathBuf {
    PathBuf::from("Interface.py")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_solve_timeout_secs() -> u64 {
    1800
}

fn default_progress_timeout_secs() -> u64 {
    120
}

fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_samples() -> u32 {
    30
}

fn default_min_budget() -> i64 {
    2
}

fn default_max_budget() -> i64 {
    6
}

fn default_ratio() -> f64 {
    0.01
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_degenerate_values() {
        let mut cfg = AppConfig::default();
        cfg.network.request_timeout_secs = 0;
        cfg.network.max_response_bytes = 3;
        cfg.ui.coefficient_samples = 0;
        cfg.ui.min_budget = 9;
        cfg.ui.max_budget = 4;
        cfg.backend.base_url = "http://localhost:7000".into();

        let cfg = cfg.normalized();
        assert_eq!(cfg.network.request_timeout_secs, 1);
        assert_eq!(cfg.network.max_response_bytes, MIN_RESPONSE_BYTES);
        assert_eq!(cfg.ui.coefficient_samples, 1);
        assert_eq!(cfg.ui.max_budget, 9);
        assert_eq!(cfg.backend.base_url, "http://localhost:7000/");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str("[backend]\nlaunch = false\n").unwrap();
        assert!(!cfg.backend.launch);
        assert_eq!(cfg.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.ui.coefficient_samples, 30);
        assert_eq!(cfg.network, NetworkSettings::default());
    }
}
