use axum::http::StatusCode;
use serde_json::Value;
use tracing::warn;

use crate::{
    clients,
    error::GatewayError,
    manifest::ToolName,
    models::ToolCallResult,
    upstream::ClientStore,
};

/// Accepted synonyms per canonical tool. No alias may appear under two tools.
const TOOL_ALIASES: [(ToolName, &[&str]); 3] = [
    (ToolName::ListClients, &["list", "listar", "clients_list"]),
    (
        ToolName::GetClient,
        &["get", "getClient", "cliente", "client_get", "get_client_by_id"],
    ),
    (
        ToolName::UpdateClient,
        &["update", "atualizar", "updateClient", "client_update"],
    ),
];

/// Exact, case-sensitive lookup of a canonical name or alias.
pub fn resolve(name: Option<&str>) -> Option<ToolName> {
    let name = name.filter(|n| !n.is_empty())?;

    if let Some(tool) = ToolName::ALL.iter().find(|t| t.as_str() == name) {
        return Some(*tool);
    }

    TOOL_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&name))
        .map(|(tool, _)| *tool)
}

pub fn aliases_of(tool: ToolName) -> &'static [&'static str] {
    TOOL_ALIASES
        .iter()
        .find(|(t, _)| *t == tool)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Runs one resolved tool. Never fails: every outcome is folded into the envelope.
pub async fn dispatch(store: &dyn ClientStore, tool: ToolName, args: &Value) -> ToolCallResult {
    let outcome = match tool {
        ToolName::ListClients => clients::list_clients(store)
            .await
            .and_then(|records| to_result(&records)),
        ToolName::GetClient => {
            let Some(id) = non_empty_str(args, "id") else {
                return ToolCallResult::failure(StatusCode::BAD_REQUEST, "id required");
            };
            clients::get_client(store, id)
                .await
                .and_then(|record| to_result(&record))
        }
        ToolName::UpdateClient => {
            let (Some(id), Some(data)) = (non_empty_str(args, "id"), object_arg(args, "data"))
            else {
                return ToolCallResult::failure(StatusCode::BAD_REQUEST, "id and data required");
            };
            clients::update_client(store, id, data)
                .await
                .and_then(|record| to_result(&record))
        }
    };

    match outcome {
        Ok(result) => ToolCallResult::success(result),
        Err(err) => {
            warn!(tool = tool.as_str(), error = %err, "Tool call failed");
            ToolCallResult::failure(err.status(), err.to_string())
        }
    }
}

fn non_empty_str<'a>(args: &'a Value, field: &str) -> Option<&'a str> {
    args.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn object_arg<'a>(args: &'a Value, field: &str) -> Option<&'a Value> {
    args.get(field).filter(|v| v.is_object())
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value)
        .map_err(|err| GatewayError::Internal(format!("failed to encode tool result: {err}")))
}
