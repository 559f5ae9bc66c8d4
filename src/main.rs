use clap::Parser;
use fc_task_client::utils::{logger, validation::Validate};
use fc_task_client::{CliConfig, ClientError, HttpTaskClient, ProbeEngine, DEFAULT_SERVER_URL};

fn exit_with(e: &ClientError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Task request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 日誌設定可能來自配置檔，所以要先讀配置
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    if settings.log_json {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::debug!("CLI config: {:?}", config);
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let command = match config.command() {
        Ok(command) => command,
        Err(e) => exit_with(&e),
    };

    let client = match HttpTaskClient::new(DEFAULT_SERVER_URL, &settings) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };

    let engine = ProbeEngine::new(client, settings.output_format);
    let mut stdout = std::io::stdout().lock();

    match engine.run(&command, &mut stdout).await {
        Ok(outcome) => {
            if let Some(server_error) = outcome.server_error {
                exit_with(&ClientError::ServerReported {
                    errno: server_error.errno,
                    message: server_error.message,
                });
            }
            tracing::info!(
                "✅ Task {} answered with HTTP {}",
                command.task_id(),
                outcome.status
            );
        }
        Err(e) => exit_with(&e),
    }
}
