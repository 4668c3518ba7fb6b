//! Layered settings for the dashboard.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. An optional config file (`--config signal-console.toml`)
//! 3. `SIGNAL_CONSOLE_*` environment variables
//! 4. The bare `API_BASE` environment variable
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! api_base = "http://10.0.0.5:8000"
//! poll_interval_ms = 5000
//! request_timeout_ms = 4000
//! log_file = "signal-console.log"
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Result};
use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::poll::{PollConfig, POLL_INTERVAL};
use crate::source::{DEFAULT_API_BASE, REQUEST_TIMEOUT};

/// Prefix for settings read from the environment.
pub const ENV_PREFIX: &str = "SIGNAL_CONSOLE";

/// Environment variable that overrides the API base directly.
pub const API_BASE_VAR: &str = "API_BASE";

/// Port the backend listens on when only a host is configured.
pub const BACKEND_PORT: u16 = 8000;

/// Values given on the command line, applied over every other layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub host: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit API base, e.g. `http://10.0.0.5:8000`.
    pub api_base: Option<String>,
    /// Host the backend runs on; used with [`BACKEND_PORT`] when `api_base` is unset.
    pub host: Option<String>,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// Where to write logs in interactive mode. No logging when unset.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: None,
            host: None,
            poll_interval_ms: POLL_INTERVAL.as_millis() as u64,
            request_timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load settings, reading variables from `env` instead of the process
    /// environment when given.
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let api_base_var = match &env {
            Some(vars) => vars.get(API_BASE_VAR).cloned(),
            None => std::env::var(API_BASE_VAR).ok(),
        };

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );
        if let Some(api_base) = api_base_var.filter(|s| !s.is_empty()) {
            builder = builder.set_override("api_base", api_base)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides and re-validate.
    ///
    /// An API base or host given here replaces any API base from the file or
    /// environment. An explicit API base beats a host.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<()> {
        if overrides.api_base.is_some() || overrides.host.is_some() {
            let host = overrides.host.as_deref().or(self.host.as_deref());
            self.api_base = Some(resolve_api_base(overrides.api_base.as_deref(), host));
        }
        if overrides.host.is_some() {
            self.host = overrides.host;
        }
        if let Some(interval) = overrides.poll_interval_ms {
            self.poll_interval_ms = interval;
        }
        if let Some(timeout) = overrides.request_timeout_ms {
            self.request_timeout_ms = timeout;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = Some(path);
        }
        self.validate()
    }

    /// Check values that would make polling meaningless.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.poll_interval_ms > 0, "poll_interval_ms must be greater than zero");
        ensure!(self.request_timeout_ms > 0, "request_timeout_ms must be greater than zero");
        Ok(())
    }

    /// The API base to poll.
    pub fn api_base(&self) -> String {
        resolve_api_base(self.api_base.as_deref(), self.host.as_deref())
    }

    /// Poll timing from these settings.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

/// Resolve the API base: explicit override, else the host on the backend
/// port, else loopback.
pub fn resolve_api_base(explicit: Option<&str>, host: Option<&str>) -> String {
    if let Some(base) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return base.to_string();
    }
    if let Some(host) = host.map(str::trim).filter(|s| !s.is_empty()) {
        return format!("http://{}:{}", host, BACKEND_PORT);
    }
    DEFAULT_API_BASE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(resolve_api_base(Some("http://x:9000"), Some("h")), "http://x:9000");
        assert_eq!(resolve_api_base(Some(""), Some("dash.local")), "http://dash.local:8000");
        assert_eq!(resolve_api_base(None, None), "http://127.0.0.1:8000");
        assert_eq!(resolve_api_base(None, Some("  ")), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base(), "http://127.0.0.1:8000");
        assert_eq!(settings.poll_config(), PollConfig::default());
    }

    #[test]
    fn test_file_and_env_layers() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
host = "10.1.1.7"
poll_interval_ms = 2000
log_level = "debug"
"#
        )
        .unwrap();

        let settings = Settings::load_from(
            Some(file.path()),
            env(&[("SIGNAL_CONSOLE_POLL_INTERVAL_MS", "3000")]),
        )
        .unwrap();

        assert_eq!(settings.host.as_deref(), Some("10.1.1.7"));
        assert_eq!(settings.poll_interval_ms, 3000);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.api_base(), "http://10.1.1.7:8000");
    }

    #[test]
    fn test_api_base_variable_wins() {
        let settings = Settings::load_from(
            None,
            env(&[
                ("SIGNAL_CONSOLE_API_BASE", "http://from-prefixed:8000"),
                ("API_BASE", "http://from-bare:8000"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.api_base(), "http://from-bare:8000");
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = Settings::load_from(None, env(&[("SIGNAL_CONSOLE_POLL_INTERVAL_MS", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_host_beats_api_base_variable() {
        let mut settings =
            Settings::load_from(None, env(&[("API_BASE", "http://from-env:8000")])).unwrap();
        settings
            .apply_overrides(Overrides {
                host: Some("10.2.2.2".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.api_base(), "http://10.2.2.2:8000");
    }

    #[test]
    fn test_cli_api_base_beats_cli_host() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(Overrides {
                api_base: Some("http://explicit:9000".to_string()),
                host: Some("10.2.2.2".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.api_base(), "http://explicit:9000");
    }

    #[test]
    fn test_blank_cli_api_base_falls_back_to_configured_host() {
        let mut settings =
            Settings::load_from(None, env(&[("SIGNAL_CONSOLE_HOST", "dash.local")])).unwrap();
        settings
            .apply_overrides(Overrides {
                api_base: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.api_base(), "http://dash.local:8000");
    }

    #[test]
    fn test_cli_timing_and_log_file() {
        let mut settings =
            Settings::load_from(None, env(&[("SIGNAL_CONSOLE_POLL_INTERVAL_MS", "3000")])).unwrap();
        settings
            .apply_overrides(Overrides {
                poll_interval_ms: Some(1000),
                request_timeout_ms: Some(800),
                log_file: Some(PathBuf::from("console.log")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.poll_interval_ms, 1000);
        assert_eq!(settings.request_timeout_ms, 800);
        assert_eq!(settings.log_file, Some(PathBuf::from("console.log")));
        // Untouched layers survive
        assert_eq!(settings.api_base(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_cli_zero_timeout_rejected() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(Overrides {
            request_timeout_ms: Some(0),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
