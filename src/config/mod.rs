//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments. A `Config` is built once before a run
//! and handed to the auditor; nothing reads configuration globally.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{config_files, output_formats, timeouts};
use crate::core::error::{AuditError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for each URL check
    pub timeout: Option<u64>,

    /// Pause ads whose destination URL is broken
    pub auto_pause: Option<bool>,

    /// Endpoint receiving pause mutations
    pub pause_endpoint: Option<String>,

    /// Only audit ads that are enabled in enabled campaigns
    pub enabled_only: Option<bool>,

    /// URL patterns to skip (regex)
    pub exclude_patterns: Option<Vec<String>>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Output format (text, json, csv)
    pub output_format: Option<String>,

    /// File the report is written to (stdout when unset, required for csv)
    pub output_path: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            auto_pause: Some(false),
            pause_endpoint: None,
            enabled_only: Some(true),
            exclude_patterns: None,
            user_agent: None,
            proxy: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            output_path: None,
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file. Only the TOML is checked here;
    /// cross-field rules are applied by [`Config::validate`] once CLI
    /// arguments have been merged in.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AuditError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            AuditError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Find a config file in the working directory or its parents.
    /// Falls back to defaults when none exists; a file that exists but
    /// cannot be parsed is an error.
    pub fn load_from_standard_locations() -> Result<Self> {
        Self::discover_from(Path::new("."))
    }

    fn discover_from(start: &Path) -> Result<Self> {
        let mut dir = start.to_path_buf();
        for _ in 0..=config_files::PARENT_SEARCH_DEPTH {
            let candidate = dir.join(config_files::FILE_NAME);
            if candidate.is_file() {
                return Self::load_from_file(&candidate);
            }
            dir.push("..");
        }

        Ok(Self::default())
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }

        // Remediation
        if cli_config.auto_pause {
            self.auto_pause = Some(true);
        }
        if let Some(ref endpoint) = cli_config.pause_endpoint {
            self.pause_endpoint = Some(endpoint.clone());
        }

        // Filtering
        if cli_config.include_paused {
            self.enabled_only = Some(false);
        }
        if let Some(ref exclude_patterns) = cli_config.exclude_patterns {
            self.exclude_patterns = Some(exclude_patterns.clone());
        }

        // Network
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }

        // Output
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref output_path) = cli_config.output_path {
            self.output_path = Some(output_path.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Compile exclude patterns into regex objects
    pub fn compile_exclude_patterns(&self) -> Result<Vec<Regex>> {
        let mut compiled = Vec::new();
        if let Some(ref patterns) = self.exclude_patterns {
            for pattern in patterns {
                compiled.push(Regex::new(pattern)?);
            }
        }
        Ok(compiled)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn auto_pause_enabled(&self) -> bool {
        self.auto_pause.unwrap_or(false)
    }

    pub fn enabled_only(&self) -> bool {
        self.enabled_only.unwrap_or(true)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(AuditError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(AuditError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if self.auto_pause_enabled()
            && self
                .pause_endpoint
                .as_deref()
                .is_none_or(|endpoint| endpoint.trim().is_empty())
        {
            return Err(AuditError::Config(
                "Auto-pause is enabled but no pause endpoint is configured.".to_string(),
            ));
        }

        let format = self.output_format();
        if !output_formats::ALL.contains(&format) {
            return Err(AuditError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }
        if format == output_formats::CSV && self.output_path.is_none() {
            return Err(AuditError::Config(
                "CSV output requires an output path.".to_string(),
            ));
        }

        self.compile_exclude_patterns()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>, // --timeout

    // Remediation
    pub auto_pause: bool,               // --auto-pause
    pub pause_endpoint: Option<String>, // --pause-endpoint

    // Filtering
    pub include_paused: bool,                  // --include-paused
    pub exclude_patterns: Option<Vec<String>>, // --exclude-pattern

    // Network
    pub user_agent: Option<String>, // --user-agent
    pub proxy: Option<String>,      // --proxy

    // Output
    pub output_format: Option<String>, // --format
    pub output_path: Option<String>,   // --output
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
