use crate::core::{ConfigProvider, SubmitResponse, TaskApi, TaskId, TaskResponse};
use crate::domain::model::ServerError;
use crate::utils::codec;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Where the file-compare task server listens.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8888";

const MAX_REDIRECTS: usize = 4;
const BODY_SNIPPET_CHARS: usize = 512;

pub struct HttpTaskClient {
    base_url: Url,
    client: Client,
    compress_requests: bool,
}

impl HttpTaskClient {
    pub fn new<C: ConfigProvider>(base_url: &str, config: &C) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| ClientError::ConfigError {
            message: format!("Invalid base URL {}: {}", base_url, e),
        })?;

        let mut builder = Client::builder().redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
            compress_requests: config.compress_requests(),
        })
    }

    pub fn task_url(&self, id: &TaskId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::ConfigError {
                message: format!("Base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .push("task")
            .push(id.as_str());
        Ok(url)
    }

    /// Reads the whole body and strips any gzip layer.
    async fn read_body(response: Response) -> Result<(u16, Option<String>, Vec<u8>)> {
        let status = response.status();
        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let raw = response.bytes().await?;
        tracing::debug!(
            "Response status: {}, encoding: {:?}, {} bytes on the wire",
            status,
            encoding,
            raw.len()
        );

        // 失敗的回應先保留狀態碼，內容盡量解壓
        if !status.is_success() {
            let body = codec::decode_body(&raw, encoding.as_deref())
                .unwrap_or_else(|_| raw.to_vec());
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let decoded = codec::decode_body(&raw, encoding.as_deref())?;

        Ok((status.as_u16(), encoding, decoded))
    }
}

fn snippet(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .chars()
        .take(BODY_SNIPPET_CHARS)
        .collect()
}

#[async_trait::async_trait]
impl TaskApi for HttpTaskClient {
    async fn fetch_task(&self, id: &TaskId) -> Result<TaskResponse> {
        let url = self.task_url(id)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .await?;

        let (status, content_encoding, decoded) = Self::read_body(response).await?;

        let body: serde_json::Value =
            serde_json::from_slice(&decoded).map_err(|e| ClientError::Decode {
                message: format!("body is not JSON ({}): {}", e, snippet(&decoded)),
            })?;

        let server_error = ServerError::from_body(&body);
        if let Some(err) = &server_error {
            tracing::warn!("⚠️ Task {} errno:{}, errmsg:{}", id, err.errno, err.message);
        }

        Ok(TaskResponse {
            status,
            content_encoding,
            body,
            server_error,
        })
    }

    async fn submit_task(&self, id: &TaskId, payload: &serde_json::Value) -> Result<SubmitResponse> {
        let url = self.task_url(id)?;
        let plain = serde_json::to_vec(payload)?;

        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, "gzip");

        // 壓縮失敗時退回原始內容
        let body = if self.compress_requests {
            match codec::gzip(&plain) {
                Ok(packed) => {
                    request = request.header(CONTENT_ENCODING, "gzip");
                    packed
                }
                Err(e) => {
                    tracing::warn!("gzip of request body failed, sending it plain: {}", e);
                    plain
                }
            }
        } else {
            plain
        };

        tracing::debug!("POST {} ({} bytes)", url, body.len());
        let response = request.body(body).send().await?;
        let (status, _, decoded) = Self::read_body(response).await?;

        // 伺服器對提交可能只回純文字
        let body = serde_json::from_slice(&decoded).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&decoded).into_owned())
        });

        Ok(SubmitResponse { status, body })
    }
}
