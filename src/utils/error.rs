use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server answered with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Response decoding error: {message}")]
    Decode { message: String },

    #[error("Server reported errno {errno}: {message}")]
    ServerReported { errno: i64, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Protocol,
    Server,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api(_) => ErrorCategory::Network,
            ClientError::HttpStatus { .. } | ClientError::Decode { .. } => ErrorCategory::Protocol,
            ClientError::Serialization(_) => ErrorCategory::Protocol,
            ClientError::ServerReported { .. } => ErrorCategory::Server,
            ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ClientError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Protocol | ErrorCategory::Server => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::Api(e) if e.is_timeout() => {
                "The server did not answer in time; raise --timeout-secs or check server load"
            }
            ClientError::Api(e) if e.is_connect() => {
                "Make sure the file-compare server is running on 127.0.0.1:8888"
            }
            ClientError::Api(_) => "Check network connectivity to the task server",
            ClientError::HttpStatus { status, .. } if *status == 404 => {
                "Check that the task id exists on the server"
            }
            ClientError::HttpStatus { .. } => "Inspect the server log for the failed request",
            ClientError::Decode { .. } | ClientError::Serialization(_) => {
                "The server returned a body that is not valid (gzip) JSON"
            }
            ClientError::ServerReported { .. } => {
                "The task server rejected or failed the task; see the errno message"
            }
            ClientError::Io(_) => "Check that the file exists and is readable",
            ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::ConfigValidationError { .. } => {
                "Fix the command line arguments or the TOML config file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Api(e) if e.is_connect() => {
                "Could not connect to the task server".to_string()
            }
            ClientError::Api(e) if e.is_timeout() => "Request to the task server timed out".to_string(),
            ClientError::HttpStatus { status, .. } => {
                format!("Task server answered with HTTP status {}", status)
            }
            ClientError::ServerReported { errno, message } if message.is_empty() => {
                format!("Task server reported error {}", errno)
            }
            ClientError::ServerReported { errno, message } => {
                format!("Task server reported error {}: {}", errno, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Messages for the task server's numeric error codes.
pub fn server_code_message(errno: i64) -> Option<&'static str> {
    let msg = match errno {
        0 => "success",
        1 => "function not implemented",
        2 => "assert failed",
        3 => "argument invalid",
        4 => "os env structure not found",
        5 => "os env memory error",
        6 => "os env stat error",
        7 => "os env open error",
        8 => "os env read error",
        9 => "os env write error",
        10 => "os env unlink error",
        11 => "dc api ctx not found",
        12 => "dc api ctx no free",
        13 => "dc compare connect error",
        14 => "dc compare exe task failed",
        15 => "dc db module need retry",
        16 => "dc db msql init error",
        17 => "dc db msql set charset error",
        18 => "dc db msql set connect timeout error",
        19 => "dc db msql connect error",
        20 => "dc db mysql query error",
        21 => "dc db mysql use result error",
        22 => "dc db mysql no result error",
        23 => "dc db mysql fetch row error",
        24 => "dc db mysql free result error",
        25 => "dc db mysql no more rows error",
        26 => "dc task has been canceled",
        27 => "dc db mysql fetch field error",
        28 => "dc db mysql pk not found error",
        29 => "dc task too many diff rows",
        41 => "dc task operations not over",
        _ => return None,
    };
    Some(msg)
}
