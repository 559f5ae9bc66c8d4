use crate::core::{OutputFormat, ProbeCommand, TaskApi};
use crate::domain::model::ServerError;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: u16,
    pub body: serde_json::Value,
    pub server_error: Option<ServerError>,
}

pub struct ProbeEngine<A: TaskApi> {
    api: A,
    format: OutputFormat,
}

impl<A: TaskApi> ProbeEngine<A> {
    pub fn new(api: A, format: OutputFormat) -> Self {
        Self { api, format }
    }

    /// Runs one command and prints the decoded body to `out`.
    ///
    /// A server error envelope is still printed; it is handed back in the
    /// outcome rather than turned into an `Err`.
    pub async fn run<W: Write>(&self, command: &ProbeCommand, out: &mut W) -> Result<ProbeOutcome> {
        let outcome = match command {
            ProbeCommand::Fetch { id } => {
                tracing::info!("🔍 Fetching task {}", id);
                let resp = self.api.fetch_task(id).await?;
                ProbeOutcome {
                    status: resp.status,
                    body: resp.body,
                    server_error: resp.server_error,
                }
            }
            ProbeCommand::Submit { id, payload } => {
                tracing::info!("📤 Submitting task {}", id);
                let resp = self.api.submit_task(id, payload).await?;
                let server_error = ServerError::from_body(&resp.body);
                ProbeOutcome {
                    status: resp.status,
                    body: resp.body,
                    server_error,
                }
            }
        };

        let rendered = render(&outcome.body, self.format)?;
        writeln!(out, "{}", rendered)?;
        out.flush()?;

        tracing::debug!("Printed {} bytes of JSON (HTTP {})", rendered.len(), outcome.status);
        Ok(outcome)
    }
}

pub fn render(value: &serde_json::Value, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(text)
}
