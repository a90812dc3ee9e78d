use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContentBlock, TextContent};
use crate::arguments::Arguments;

/// The server's response to a tools/list request from the client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListToolsResult {
    /// Tool entries returned by the server.
    pub tools: Vec<Tool>,
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    /// Cursor for the next page of results.
    pub next_cursor: Option<String>,
}

impl ListToolsResult {
    /// Create an empty tools list result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single tool to the result.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }
}

/// Parameters of a tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

/// The server's response to a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Content returned by the tool call.
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    /// Whether the tool call resulted in an error.
    pub is_error: Option<bool>,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    /// Structured payload returned by the tool, if any.
    pub structured_content: Option<Value>,
}

impl CallToolResult {
    /// Create an empty tool result.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            is_error: None,
            structured_content: None,
        }
    }

    /// Append a text content item to the result.
    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentBlock::Text(TextContent::new(text)));
        self
    }

    /// Mark this result as indicating an error.
    ///
    /// Tool results are successful by default (when `is_error` is `None`),
    /// so this only needs to be called when the tool execution failed but
    /// the failure is reported as content rather than a protocol error.
    pub fn mark_as_error(mut self) -> Self {
        self.is_error = Some(true);
        self
    }

    /// Get the first text content block, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text(text) => Some(text.text.as_str()),
        })
    }

    /// Get all text content concatenated together, joined with newlines.
    pub fn all_text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text(text) => text.text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CallToolResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Definition for a tool the client can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional tool description.
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    /// JSON Schema describing tool input.
    pub input_schema: ToolSchema,
}

impl Tool {
    /// Create a new tool with the provided name and input schema.
    pub fn new(name: impl Into<String>, input_schema: ToolSchema) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema,
        }
    }

    /// Create a tool whose input schema is derived from a schemars type.
    pub fn from_schema<T: schemars::JsonSchema>(name: impl Into<String>) -> Self {
        Self::new(name, ToolSchema::from_json_schema::<T>())
    }

    /// Set the tool description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A JSON Schema object defining the input schema for a tool.
///
/// The complete schema, including descriptions and range constraints, is
/// preserved and serialized transparently as a JSON Schema object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSchema(pub Value);

impl Default for ToolSchema {
    fn default() -> Self {
        Self(serde_json::json!({ "type": "object" }))
    }
}

impl ToolSchema {
    /// Derive a schema from a schemars JsonSchema type.
    pub fn from_json_schema<T: schemars::JsonSchema>() -> Self {
        let schema = schemars::schema_for!(T);
        Self(serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_tool_result_text_helpers() {
        let result = CallToolResult::new()
            .with_text_content("first")
            .with_text_content("second");
        assert_eq!(result.text(), Some("first"));
        assert_eq!(result.all_text(), "first\nsecond");
        assert_eq!(result.is_error, None);

        let failed = CallToolResult::new().with_text_content("boom").mark_as_error();
        assert_eq!(failed.is_error, Some(true));
    }

    #[test]
    fn tool_schema_from_type() {
        #[derive(serde::Serialize, schemars::JsonSchema)]
        struct Params {
            /// A coordinate.
            latitude: f64,
        }

        let tool = Tool::from_schema::<Params>("probe").with_description("test");
        assert_eq!(tool.name, "probe");
        let schema = &tool.input_schema.0;
        assert!(schema.get("properties").and_then(|p| p.get("latitude")).is_some());
    }
}
