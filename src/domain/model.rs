use crate::utils::error::{server_code_message, Result};
use crate::utils::validation::validate_path_segment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The id the task server's own smoke clients query.
pub const DEFAULT_TASK_ID: &str = "b9460404-f559-4a93-be01-675045263713";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        validate_path_segment("task_id", trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self(DEFAULT_TASK_ID.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskId {
    type Error = crate::utils::error::ClientError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerError {
    pub errno: i64,
    pub message: String,
}

impl ServerError {
    /// Reads the server's `{"errno": .., "error": ..}` envelope. `errno == 0`
    /// means success and yields `None`.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let obj = body.as_object()?;
        let raw = obj.get("errno")?;
        let Some(errno) = parse_errno(raw) else {
            tracing::warn!("⚠️ Response carries an unreadable errno: {}", raw);
            return None;
        };

        if errno == 0 {
            return None;
        }

        let message = obj
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| server_code_message(errno).map(str::to_string))
            .unwrap_or_default();

        Some(Self { errno, message })
    }
}

/// Accepts integers, whole-number floats and numeric strings.
fn parse_errno(raw: &serde_json::Value) -> Option<i64> {
    if let Some(n) = raw.as_i64() {
        return Some(n);
    }
    if let Some(f) = raw.as_f64() {
        return (f.fract() == 0.0 && f.abs() <= i64::MAX as f64).then_some(f as i64);
    }
    let s = raw.as_str()?.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub status: u16,
    pub content_encoding: Option<String>,
    pub body: serde_json::Value,
    pub server_error: Option<ServerError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum ProbeCommand {
    Fetch { id: TaskId },
    Submit { id: TaskId, payload: serde_json::Value },
}

impl ProbeCommand {
    pub fn task_id(&self) -> &TaskId {
        match self {
            ProbeCommand::Fetch { id } | ProbeCommand::Submit { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}
