pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{
    client::{HttpTaskClient, DEFAULT_SERVER_URL},
    probe::{ProbeEngine, ProbeOutcome},
};
pub use domain::model::{OutputFormat, ProbeCommand, TaskId};
pub use utils::error::{ClientError, Result};
