use serde::Serialize;
use serde_json::{json, Value};

pub const MANIFEST_NAME: &str = "base44";
pub const MANIFEST_VERSION: &str = "1.0.0";

/// The three operations exposed through the tool surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListClients,
    GetClient,
    UpdateClient,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [Self::ListClients, Self::GetClient, Self::UpdateClient];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListClients => "list_clients",
            Self::GetClient => "get_client",
            Self::UpdateClient => "update_client",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListClients => "List all clients",
            Self::GetClient => "Fetch one client by id",
            Self::UpdateClient => "Update a client's data",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Self::ListClients => json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            Self::GetClient => json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "minLength": 1}
                },
                "required": ["id"],
                "additionalProperties": false
            }),
            Self::UpdateClient => json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "minLength": 1},
                    "data": {"type": "object"}
                },
                "required": ["id", "data"],
                "additionalProperties": false
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: &'static str,
    pub version: &'static str,
    pub tools: Vec<ToolDescriptor>,
}

impl Manifest {
    pub fn build() -> Self {
        Self {
            name: MANIFEST_NAME,
            version: MANIFEST_VERSION,
            tools: ToolName::ALL
                .iter()
                .map(|tool| ToolDescriptor {
                    name: tool.as_str(),
                    description: tool.description(),
                    input_schema: tool.input_schema(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_tools_in_fixed_order() {
        let value = Manifest::build().to_json();
        assert_eq!(value["name"], "base44");
        assert_eq!(value["version"], "1.0.0");
        let names: Vec<&str> = value["tools"]
            .as_array()
            .expect("tools")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, ["list_clients", "get_client", "update_client"]);
    }

    #[test]
    fn schemas_declare_required_arguments() {
        let value = Manifest::build().to_json();
        let tools = value["tools"].as_array().expect("tools");
        assert_eq!(
            tools[0]["input_schema"],
            json!({"type": "object", "properties": {}, "additionalProperties": false})
        );
        assert_eq!(tools[1]["input_schema"]["required"], json!(["id"]));
        assert_eq!(tools[1]["input_schema"]["properties"]["id"]["minLength"], 1);
        assert_eq!(tools[2]["input_schema"]["required"], json!(["id", "data"]));
        assert_eq!(
            tools[2]["input_schema"]["properties"]["data"],
            json!({"type": "object"})
        );
    }
}
