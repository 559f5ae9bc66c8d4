#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use serde::Serialize;
use toml_config::{TomlConfig, MAX_TIMEOUT_SECONDS, MIN_TIMEOUT_SECONDS};

/// Flags given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub timeout_seconds: Option<u64>,
    pub no_compress: bool,
    pub compact: bool,
    pub log_json: bool,
}

/// Effective settings after layering CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub timeout_seconds: Option<u64>,
    pub compress_requests: bool,
    pub output_format: OutputFormat,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            compress_requests: true,
            output_format: OutputFormat::Pretty,
            log_level: None,
            log_json: false,
        }
    }
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Self {
        let defaults = Settings::default();

        let timeout_seconds = overrides
            .timeout_seconds
            .or_else(|| file.and_then(TomlConfig::timeout_seconds));

        let compress_requests = if overrides.no_compress {
            false
        } else {
            file.and_then(TomlConfig::compress_requests)
                .unwrap_or(defaults.compress_requests)
        };

        let output_format = if overrides.compact {
            OutputFormat::Compact
        } else {
            match file.and_then(TomlConfig::pretty) {
                Some(false) => OutputFormat::Compact,
                Some(true) => OutputFormat::Pretty,
                None => defaults.output_format,
            }
        };

        Self {
            timeout_seconds,
            compress_requests,
            output_format,
            log_level: file.and_then(|f| f.log_level().map(str::to_string)),
            log_json: overrides.log_json || file.and_then(TomlConfig::log_json).unwrap_or(false),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout_seconds {
            validate_range(
                "timeout_seconds",
                timeout,
                MIN_TIMEOUT_SECONDS,
                MAX_TIMEOUT_SECONDS,
            )?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn compress_requests(&self) -> bool {
        self.compress_requests
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}
