use crate::domain::model::{OutputFormat, SubmitResponse, TaskId, TaskResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn timeout_seconds(&self) -> Option<u64>;
    fn compress_requests(&self) -> bool;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn fetch_task(&self, id: &TaskId) -> Result<TaskResponse>;
    async fn submit_task(&self, id: &TaskId, payload: &serde_json::Value) -> Result<SubmitResponse>;
}
