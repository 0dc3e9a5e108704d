use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway-side view of one upstream `Client` entity.
///
/// Absent fields serialize as `null`; present ones are copied as the upstream sent them.
/// `raw` is the upstream payload exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub id: Option<String>,
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub company: Option<Value>,
    pub status: Option<Value>,
    pub raw: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default)]
    pub tool: Option<Value>,
    #[serde(default)]
    pub args: Option<Value>,
}

impl ToolCallRequest {
    /// Requested tool name as the caller sent it, for resolution and error messages.
    pub fn tool_name(&self) -> Option<&str> {
        self.tool.as_ref().and_then(Value::as_str)
    }

    pub fn requested_label(&self) -> String {
        match &self.tool {
            None | Some(Value::Null) => "undefined".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ToolCallResult {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
            status,
        }
    }
}
