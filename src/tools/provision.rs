//! Per-prompt tool provisioning: wire definitions and their resources.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{PromptSpec, ToolKind};
use crate::config::Config;
use crate::error::{HeraldError, Result};
use crate::service::AgentService;

use super::registry::ToolRegistry;

/// Wire definition of a tool attached to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    CodeInterpreter,
    Search,
    WebGrounding {
        connections: Vec<GroundingConnection>,
    },
    Function {
        function: FunctionDefinition,
    },
}

/// Declared signature of a local function tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Connection reference for the grounding tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConnection {
    pub connection_id: String,
}

/// Server-side resources backing the attached tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_interpreter: Option<CodeInterpreterResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResources>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeInterpreterResources {
    pub file_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResources {
    pub connections: Vec<SearchConnection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConnection {
    pub connection_id: String,
    pub index_name: String,
}

/// Everything a prompt's agent needs, plus the file to clean up afterwards.
#[derive(Debug, Default)]
pub struct ProvisionedTools {
    pub definitions: Vec<ToolDefinition>,
    pub resources: Option<ToolResources>,
    /// Id of the uploaded input file, deleted at disposal time.
    pub uploaded_file_id: Option<String>,
}

/// Set up the tools a prompt declares before its agent is created.
pub async fn provision(
    service: &dyn AgentService,
    config: &Config,
    registry: &ToolRegistry,
    spec: &PromptSpec,
) -> Result<ProvisionedTools> {
    let Some(kind) = spec.tool else {
        return Ok(ProvisionedTools::default());
    };

    match kind {
        ToolKind::CodeInterpreter => {
            let mut provisioned = ProvisionedTools {
                definitions: vec![ToolDefinition::CodeInterpreter],
                ..Default::default()
            };
            if let Some(path) = &spec.file_path {
                let file = service.upload_file(path, "assistants").await?;
                info!(path = %path.display(), file_id = %file.id, "uploaded input file");
                provisioned.resources = Some(ToolResources {
                    code_interpreter: Some(CodeInterpreterResources {
                        file_ids: vec![file.id.clone()],
                    }),
                    search: None,
                });
                provisioned.uploaded_file_id = Some(file.id);
            }
            Ok(provisioned)
        }
        ToolKind::Search => {
            let connection_id = config.search_connection_id.as_deref().ok_or_else(|| {
                HeraldError::Configuration(
                    "search prompts require HERALD_SEARCH_CONNECTION_ID".into(),
                )
            })?;
            let connection = service.get_connection(connection_id).await?;
            Ok(ProvisionedTools {
                definitions: vec![ToolDefinition::Search],
                resources: Some(ToolResources {
                    code_interpreter: None,
                    search: Some(SearchResources {
                        connections: vec![SearchConnection {
                            connection_id: connection.id,
                            index_name: connection.name,
                        }],
                    }),
                }),
                uploaded_file_id: None,
            })
        }
        ToolKind::Grounding => {
            let connection_id = config.grounding_connection_id.as_deref().ok_or_else(|| {
                HeraldError::Configuration(
                    "grounding prompts require HERALD_GROUNDING_CONNECTION_ID".into(),
                )
            })?;
            let connection = service.get_connection(connection_id).await?;
            Ok(ProvisionedTools {
                definitions: vec![ToolDefinition::WebGrounding {
                    connections: vec![GroundingConnection {
                        connection_id: connection.id,
                    }],
                }],
                resources: None,
                uploaded_file_id: None,
            })
        }
        ToolKind::Function => Ok(ProvisionedTools {
            definitions: function_definitions(registry),
            resources: None,
            uploaded_file_id: None,
        }),
    }
}

/// Wire definitions for every registered function tool.
pub fn function_definitions(registry: &ToolRegistry) -> Vec<ToolDefinition> {
    let mut definitions: Vec<ToolDefinition> = registry
        .tools()
        .map(|tool| ToolDefinition::Function {
            function: FunctionDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters().schema.clone(),
            },
        })
        .collect();
    // registry iteration order is unspecified; keep the wire payload stable
    definitions.sort_by(|a, b| {
        let name = |d: &ToolDefinition| match d {
            ToolDefinition::Function { function } => function.name.clone(),
            _ => String::new(),
        };
        name(a).cmp(&name(b))
    });
    definitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::cpu_usage_tool;

    #[test]
    fn tool_definitions_serialize_with_type_tags() {
        let json = serde_json::to_value(ToolDefinition::CodeInterpreter).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "code_interpreter" }));

        let grounding = ToolDefinition::WebGrounding {
            connections: vec![GroundingConnection {
                connection_id: "conn_1".into(),
            }],
        };
        let json = serde_json::to_value(grounding).unwrap();
        assert_eq!(json["type"], "web_grounding");
        assert_eq!(json["connections"][0]["connection_id"], "conn_1");
    }

    #[test]
    fn function_definitions_reflect_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(cpu_usage_tool()).unwrap();

        let defs = function_definitions(&registry);
        assert_eq!(defs.len(), 1);
        match &defs[0] {
            ToolDefinition::Function { function } => {
                assert_eq!(function.name, "cpu_usage");
                assert_eq!(function.parameters["type"], "object");
            }
            other => panic!("unexpected definition: {other:?}"),
        }
    }

    #[test]
    fn empty_resources_serialize_to_empty_object() {
        let json = serde_json::to_value(ToolResources::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
