use anyhow::Result;
use fc_task_client::config::{Overrides, Settings};
use fc_task_client::domain::model::DEFAULT_TASK_ID;
use fc_task_client::utils::codec;
use fc_task_client::{
    ClientError, CliConfig, HttpTaskClient, OutputFormat, ProbeCommand, ProbeEngine, TaskId,
};
use clap::Parser;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn compact_settings() -> Settings {
    Settings::resolve(
        None,
        &Overrides {
            timeout_seconds: Some(5),
            compact: true,
            ..Overrides::default()
        },
    )
}

#[tokio::test]
async fn test_fetch_gzip_task_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let task = json!({
        "id": DEFAULT_TASK_ID,
        "data": [
            {
                "dir": "/tmp/res",
                "files": [
                    {
                        "file": "a.conf",
                        "servers": [
                            {"server": "m2", "size": 12, "permission": "rw-r--r--", "owner": "admin"}
                        ]
                    }
                ]
            }
        ]
    });
    let packed = codec::gzip(serde_json::to_string(&task)?.as_bytes())?;

    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/task/{}", DEFAULT_TASK_ID));
        then.status(200)
            .header("Content-Type", "application/json")
            .header("Content-Encoding", "gzip")
            .body(packed);
    });

    let settings = compact_settings();
    let client = HttpTaskClient::new(&server.base_url(), &settings)?;
    let engine = ProbeEngine::new(client, settings.output_format);

    let mut out = Vec::new();
    let outcome = engine
        .run(&ProbeCommand::Fetch { id: TaskId::default() }, &mut out)
        .await?;

    api_mock.assert();
    assert_eq!(outcome.status, 200);
    assert!(outcome.server_error.is_none());

    let printed: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(printed, task);
    assert!(out.ends_with(b"\n"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_gzip_without_header() -> Result<()> {
    let server = MockServer::start();
    let packed = codec::gzip(br#"{"id":"t1","data":[]}"#)?;

    server.mock(|when, then| {
        when.method(GET).path("/task/t1");
        then.status(200).body(packed);
    });

    let settings = compact_settings();
    let client = HttpTaskClient::new(&server.base_url(), &settings)?;
    let engine = ProbeEngine::new(client, OutputFormat::Compact);

    let mut out = Vec::new();
    engine
        .run(
            &ProbeCommand::Fetch {
                id: TaskId::parse("t1")?,
            },
            &mut out,
        )
        .await?;

    assert_eq!(String::from_utf8(out)?, "{\"data\":[],\"id\":\"t1\"}\n");
    Ok(())
}

#[tokio::test]
async fn test_fetch_reports_server_errno() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/task/t2");
        then.status(200)
            .json_body(json!({"errno": 11}));
    });

    let settings = compact_settings();
    let client = HttpTaskClient::new(&server.base_url(), &settings)?;
    let engine = ProbeEngine::new(client, OutputFormat::Compact);

    let mut out = Vec::new();
    let outcome = engine
        .run(
            &ProbeCommand::Fetch {
                id: TaskId::parse("t2")?,
            },
            &mut out,
        )
        .await?;

    assert_eq!(String::from_utf8(out)?, "{\"errno\":11}\n");
    let server_error = outcome.server_error.expect("errno envelope detected");
    assert_eq!(server_error.errno, 11);
    assert_eq!(server_error.message, "dc api ctx not found");
    Ok(())
}

#[tokio::test]
async fn test_fetch_server_down() -> Result<()> {
    // 沒有伺服器在聽的埠
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let settings = compact_settings();
    let client = HttpTaskClient::new(&format!("http://{}", addr), &settings)?;
    let engine = ProbeEngine::new(client, OutputFormat::Compact);

    let mut out = Vec::new();
    let err = engine
        .run(&ProbeCommand::Fetch { id: TaskId::default() }, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api(_)));
    assert_eq!(err.severity().exit_code(), 2);
    assert!(out.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_submit_from_file_gzip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.json");
    let document = json!({
        "uuid": "t3",
        "result_type": 0,
        "servers": [
            {"center": "m1", "host": "localhost", "user": "admin", "password": "admin",
             "port": 8091, "standard": true, "path_to_compare": "/tmp/res"},
            {"center": "m2", "host": "localhost", "user": "admin", "password": "admin",
             "port": 8091, "standard": false, "path_to_compare": "/tmp/ok"}
        ]
    });
    tokio::fs::write(&input, serde_json::to_vec_pretty(&document)?).await?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/task/t3")
            .header("content-type", "application/json")
            .header("content-encoding", "gzip");
        then.status(200).body("Test for server send gzip data\n");
    });

    let cli = CliConfig::parse_from([
        "fc-task-client",
        "t3",
        "--submit",
        input.to_str().unwrap(),
        "--compact",
    ]);
    let settings = cli.settings()?;
    let command = cli.command()?;

    let client = HttpTaskClient::new(&server.base_url(), &settings)?;
    let engine = ProbeEngine::new(client, settings.output_format);

    let mut out = Vec::new();
    let outcome = engine.run(&command, &mut out).await?;

    api_mock.assert();
    assert_eq!(outcome.body, json!("Test for server send gzip data\n"));
    assert_eq!(String::from_utf8(out)?, "\"Test for server send gzip data\\n\"\n");
    Ok(())
}

#[tokio::test]
async fn test_config_file_drives_output_format() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("fc.toml");
    tokio::fs::write(&config_path, "[output]\npretty = false\n[client]\ntimeout_seconds = 3\n").await?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/task/t5");
        then.status(200).json_body(json!({"id": "t5"}));
    });

    let cli = CliConfig::parse_from([
        "fc-task-client",
        "t5",
        "--config",
        config_path.to_str().unwrap(),
    ]);
    let settings = cli.settings()?;
    assert_eq!(settings.output_format, OutputFormat::Compact);
    assert_eq!(settings.timeout_seconds, Some(3));

    let client = HttpTaskClient::new(&server.base_url(), &settings)?;
    let engine = ProbeEngine::new(client, settings.output_format);

    let mut out = Vec::new();
    engine.run(&cli.command()?, &mut out).await?;
    assert_eq!(String::from_utf8(out)?, "{\"id\":\"t5\"}\n");
    Ok(())
}
