pub mod client;
pub mod probe;

pub use crate::domain::model::{
    OutputFormat, ProbeCommand, SubmitResponse, TaskId, TaskResponse,
};
pub use crate::domain::ports::{ConfigProvider, TaskApi};
pub use crate::utils::error::Result;
