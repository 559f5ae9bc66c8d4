use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::core::{ProbeCommand, TaskId};
use crate::domain::model::DEFAULT_TASK_ID;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fc-task-client")]
#[command(about = "Query or submit a task on the local file-compare server")]
pub struct CliConfig {
    /// Task uuid
    #[arg(default_value = DEFAULT_TASK_ID)]
    pub task_id: String,

    /// POST the JSON document in this file instead of fetching the task
    #[arg(long, value_name = "FILE")]
    pub submit: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Send the submitted document without gzip
    #[arg(long)]
    pub no_compress: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "N")]
    pub timeout_secs: Option<u64>,

    /// Optional TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            timeout_seconds: self.timeout_secs,
            no_compress: self.no_compress,
            compact: self.compact,
            log_json: self.log_json,
        }
    }

    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };

        validate_path("config", path)?;
        let file = TomlConfig::from_file(path)?;
        file.validate()?;
        Ok(Some(file))
    }

    pub fn settings(&self) -> Result<Settings> {
        let file = self.load_file_config()?;
        let settings = Settings::resolve(file.as_ref(), &self.overrides());
        settings.validate()?;
        Ok(settings)
    }

    /// Builds the command; for `--submit` this reads and parses the payload file.
    pub fn command(&self) -> Result<ProbeCommand> {
        let id = TaskId::parse(&self.task_id)?;

        match &self.submit {
            None => Ok(ProbeCommand::Fetch { id }),
            Some(path) => {
                let payload = read_payload(path)?;
                Ok(ProbeCommand::Submit { id, payload })
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        TaskId::parse(&self.task_id)?;
        if let Some(path) = &self.submit {
            validate_path("submit", path)?;
        }
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}

pub fn read_payload<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    serde_json::from_slice(&content).map_err(|e| ClientError::ConfigValidationError {
        field: "submit".to_string(),
        message: format!("{} is not valid JSON: {}", path.display(), e),
    })
}
