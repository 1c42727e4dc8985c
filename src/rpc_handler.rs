//! RPC method handler for the jobmark JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the bookmark state, the job
//! feed or the settings engine held by `App`.

use serde_json::{json, Value};

use crate::app::App;
use crate::services::settings_engine;
use crate::types::job::{JobId, JobRecord};

/// Reads the job payload from `params.job`, or from `params` itself.
fn job_param(params: &Value) -> Result<JobRecord, String> {
    let raw = params.get("job").unwrap_or(params);
    serde_json::from_value(raw.clone()).map_err(|e| format!("invalid job: {}", e))
}

/// Reads `params.id`, accepting a number or a string.
fn id_param(params: &Value) -> Result<JobId, String> {
    match params.get("id") {
        None | Some(Value::Null) => Err("missing id".to_string()),
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid id: {}", e)),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Bookmarks ───
        "bookmark.add" => {
            let job = job_param(params)?;
            let outcome = app.bookmarks.bookmark(&job).await.map_err(|e| e.to_string())?;
            Ok(json!({
                "id": job.id,
                "bookmarked": true,
                "count": outcome.snapshot.len(),
                "stale": outcome.stale,
            }))
        }
        "bookmark.remove" => {
            let id = id_param(params)?;
            let outcome = app.bookmarks.unbookmark(&id).await.map_err(|e| e.to_string())?;
            Ok(json!({
                "id": id,
                "bookmarked": false,
                "count": outcome.snapshot.len(),
                "stale": outcome.stale,
            }))
        }
        "bookmark.toggle" => {
            let job = job_param(params)?;
            let bookmarked = app.bookmarks.toggle(&job).await.map_err(|e| e.to_string())?;
            Ok(json!({"id": job.id, "bookmarked": bookmarked}))
        }
        "bookmark.list" => {
            let snapshot = app.bookmarks.snapshot();
            serde_json::to_value(snapshot.records()).map_err(|e| e.to_string())
        }
        "bookmark.reload" => {
            let snapshot = app.bookmarks.reload().await.map_err(|e| e.to_string())?;
            serde_json::to_value(snapshot.records()).map_err(|e| e.to_string())
        }
        "bookmark.exists" => {
            let id = id_param(params)?;
            let exists = app
                .bookmarks
                .store()
                .exists(&id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "exists": exists}))
        }
        "bookmark.get" => {
            let id = id_param(params)?;
            let record = app
                .bookmarks
                .store()
                .get(&id)
                .await
                .map_err(|e| e.to_string())?;
            serde_json::to_value(record).map_err(|e| e.to_string())
        }

        // ─── Jobs ───
        "jobs.next_page" => {
            let mut feed = app.feed.lock().await;
            let added = feed.load_more().await.map_err(|e| e.to_string())?;
            Ok(json!({
                "added": added,
                "has_more": feed.has_more(),
                "next_page": feed.next_page(),
            }))
        }
        "jobs.list" => {
            let items = app.job_list().await;
            serde_json::to_value(items).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let engine = app.settings_engine.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(engine.settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut engine = app.settings_engine.lock().map_err(|e| e.to_string())?;
            engine.set_value(key, value).map_err(|e| e.to_string())?;
            // The running store and feed keep the values they were built with.
            Ok(json!({
                "ok": true,
                "restart_required": settings_engine::requires_restart(key),
            }))
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
