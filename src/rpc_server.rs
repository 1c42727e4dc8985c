//! jobmark RPC Server: JSON-RPC over stdin/stdout for a UI front end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{"job":{...}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use jobmark::app::App;
use jobmark::rpc_handler::handle_method;
use jobmark::services::logging;
use jobmark::services::settings_engine::SettingsEngine;

/// Config file override, e.g. for running several profiles side by side.
const CONFIG_ENV: &str = "JOBMARK_CONFIG";

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    let mut line = value.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());

    // The log filter lives in the settings file, so read it before anything
    // logs and report the outcome once the subscriber is up.
    let mut engine = SettingsEngine::new(config_path);
    let loaded = engine.load().map(|settings| settings.logging.filter.clone());
    logging::init_logging(loaded.as_deref().unwrap_or("info"));
    if let Err(e) = loaded {
        error!(error = %e, "failed to load settings");
        return Err(e.into());
    }
    info!(database = %engine.database_path().display(), "settings loaded");

    let app = App::from_settings(engine).map_err(|e| {
        error!(error = %e, "failed to build app");
        e
    })?;

    let storage_ready = app.startup().await;
    info!(storage_ready, "jobmark ready");

    let mut stdout = io::stdout();
    let ready = json!({
        "event": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "storage_ready": storage_ready,
    });
    write_line(&mut stdout, &ready).await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id": null, "error": format!("parse error: {}", e)});
                write_line(&mut stdout, &err).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut stdout, &response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
