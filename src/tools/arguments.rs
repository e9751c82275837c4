//! Typed access to decoded tool call arguments.

use crate::error::HeraldError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Decode the raw argument blob from a tool call request.
    ///
    /// An empty blob means "no arguments" and decodes to an empty object.
    pub fn from_raw(raw: &str) -> Result<Self, HeraldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::new(serde_json::json!({})));
        }
        let value = serde_json::from_str(trimmed).map_err(|e| {
            HeraldError::InvalidArgument(format!("malformed tool arguments: {e}"))
        })?;
        Ok(Self::new(value))
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, HeraldError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| HeraldError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64, HeraldError> {
        self.value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| HeraldError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, HeraldError> {
        self.value
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| HeraldError::InvalidArgument(format!("Missing boolean argument: {key}")))
    }

    /// Deserialize the entire arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, HeraldError> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            HeraldError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}
