use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::LocatorEngine;

const DEFAULT_STATION_LIMIT: usize = 3;

/// Line-delimited JSON-RPC 2.0 over stdin/stdout.
pub async fn run(engine: &LocatorEngine) -> Result<()> {
    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    serve(engine, stdin, &mut stdout).await
}

pub async fn serve<R, W>(engine: &LocatorEngine, input: R, out: &mut W) -> Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let msg: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_error(out, &Value::Null, -32700, &format!("parse error: {e}")).await?;
                continue;
            }
        };

        let id = msg.get("id").cloned().unwrap_or(Value::Null);
        let method = msg["method"].as_str().unwrap_or("");
        let params = msg.get("params").cloned().unwrap_or(Value::Null);

        if method.starts_with("notifications/") {
            continue;
        }

        debug!(method, "stdio request");
        match dispatch(engine, method, &params).await {
            Ok(payload) => write_ok(out, &id, payload).await?,
            Err(e) => write_error(out, &id, -32603, &e.to_string()).await?,
        }
    }
    Ok(())
}

async fn dispatch(engine: &LocatorEngine, method: &str, params: &Value) -> Result<Value> {
    match method {
        "initialize" => Ok(handle_initialize()),
        "tools/list" => Ok(handle_tools_list()),
        "tools/call" => handle_tool_call(engine, params).await,
        other => anyhow::bail!("unknown method: {other}"),
    }
}

fn handle_initialize() -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": "gm-locator", "version": env!("CARGO_PKG_VERSION") }
    })
}

fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": "locator_search",
                "description": "Fuzzy search Greater Manchester locations. Returns up to 5 locations, or { message } for invalid input.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "query": { "type": "string", "description": "Place name as typed, at least 2 characters" } },
                    "required": ["query"]
                }
            },
            {
                "name": "locator_suggest",
                "description": "Autocomplete suggestions for a partial place name. Same contract as locator_search.",
                "inputSchema": {
                    "type": "object",
                    "properties": { "query": { "type": "string", "description": "Partial place name" } },
                    "required": ["query"]
                }
            },
            {
                "name": "locator_nearest_stations",
                "description": "Police stations closest to a coordinate, nearest first, with distances in km.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "lat":   { "type": "number" },
                        "lon":   { "type": "number" },
                        "limit": { "type": "integer", "description": "Maximum stations to return (default 3)" }
                    },
                    "required": ["lat", "lon"]
                }
            },
            {
                "name": "locator_cache_stats",
                "description": "Query cache size and hit/miss counters for this process.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    })
}

async fn handle_tool_call(engine: &LocatorEngine, params: &Value) -> Result<Value> {
    let name = params["name"].as_str().unwrap_or("");
    let args = &params["arguments"];

    // A missing query is passed through as "" so the caller gets the usual message.
    let text = match name {
        "locator_search" => {
            let query = args["query"].as_str().unwrap_or("");
            serde_json::to_string_pretty(&engine.search_locations(query).await)?
        }
        "locator_suggest" => {
            let query = args["query"].as_str().unwrap_or("");
            serde_json::to_string_pretty(&engine.get_suggestions(query).await)?
        }
        "locator_nearest_stations" => {
            let (Some(lat), Some(lon)) = (args["lat"].as_f64(), args["lon"].as_f64()) else {
                anyhow::bail!("locator_nearest_stations requires numeric 'lat' and 'lon'");
            };
            let limit = args["limit"]
                .as_u64()
                .map_or(DEFAULT_STATION_LIMIT, |n| n as usize);
            serde_json::to_string_pretty(&engine.nearest_stations(lat, lon, limit))?
        }
        "locator_cache_stats" => serde_json::to_string_pretty(&engine.cache_stats())?,
        other => anyhow::bail!("unknown tool: {other}"),
    };

    Ok(json!({ "content": [{ "type": "text", "text": text }] }))
}

async fn write_ok<W: AsyncWrite + Unpin>(out: &mut W, id: &Value, result: Value) -> Result<()> {
    let envelope = json!({ "jsonrpc": "2.0", "id": id, "result": result });
    write_line(out, &envelope).await
}

async fn write_error<W: AsyncWrite + Unpin>(
    out: &mut W,
    id: &Value,
    code: i32,
    message: &str,
) -> Result<()> {
    let envelope = json!({
        "jsonrpc": "2.0", "id": id,
        "error": { "code": code, "message": message }
    });
    write_line(out, &envelope).await
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, envelope: &Value) -> Result<()> {
    let mut line = serde_json::to_string(envelope)?;
    line.push('\n');
    out.write_all(line.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
