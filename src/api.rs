use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    clients,
    error::{GatewayError, Result},
    manifest::ToolName,
    models::ToolCallRequest,
    tools::{self, aliases_of},
    AppState,
};

pub async fn root() -> &'static str {
    "base44 MCP gateway online"
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn manifest(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.manifest.to_json())
}

pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Value>> {
    let records = clients::list_clients(state.store.as_ref()).await?;
    Ok(Json(json!({ "ok": true, "data": records })))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let record = clients::get_client(state.store.as_ref(), &id).await?;
    Ok(Json(json!({ "ok": true, "data": record })))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>> {
    let data = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice::<Value>(&body)
            .map_err(|err| GatewayError::validation(format!("invalid JSON body: {err}")))?
    };
    if !data.is_object() {
        return Err(GatewayError::validation(
            "request body must be a JSON object",
        ));
    }

    let record = clients::update_client(state.store.as_ref(), &id, &data).await?;
    Ok(Json(json!({ "ok": true, "data": record })))
}

/// Browser-friendly hint for `GET /mcp/call`; not an invocation.
pub async fn mcp_call_help(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Vec<Value> = state
        .manifest
        .tools
        .iter()
        .zip(ToolName::ALL)
        .map(|(descriptor, tool)| {
            json!({
                "name": descriptor.name,
                "description": descriptor.description,
                "aliases": aliases_of(tool),
            })
        })
        .collect();

    Json(json!({
        "ok": false,
        "message": "Use POST with { tool, args }. Example: { \"tool\": \"list_clients\", \"args\": {} }",
        "tools": tools,
    }))
}

pub async fn mcp_call(State(state): State<AppState>, body: Bytes) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ToolCallRequest::default()
    } else {
        match serde_json::from_slice::<ToolCallRequest>(&body) {
            Ok(request) => request,
            Err(err) => {
                return GatewayError::validation(format!("invalid JSON body: {err}"))
                    .into_response();
            }
        }
    };

    let Some(tool) = tools::resolve(request.tool_name()) else {
        warn!(requested = %request.requested_label(), "Rejected unknown tool");
        return GatewayError::UnknownTool(request.requested_label()).into_response();
    };

    let trace_id = Uuid::new_v4();
    info!(
        trace_id = %trace_id,
        requested = %request.requested_label(),
        tool = tool.as_str(),
        "Dispatching tool call"
    );

    let args = request.args.unwrap_or_else(|| json!({}));
    let result = tools::dispatch(state.store.as_ref(), tool, &args).await;
    let status = if result.ok { StatusCode::OK } else { result.status };
    (status, Json(result)).into_response()
}
