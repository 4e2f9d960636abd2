//! Compiled statements

use crate::error::GraphResult;
use crate::graph::{PropertyMap, PropertyValue};
use serde::{Serialize, Serializer};

/// Statement text plus the values of every `$` parameter it references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledStatement {
    #[serde(rename = "query")]
    pub text: String,
    #[serde(serialize_with = "serialize_params")]
    pub params: PropertyMap,
}

/// Parameters as plain JSON values, in binding order
fn serialize_params<S: Serializer>(params: &PropertyMap, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(params.iter().map(|(name, value)| (name, value.to_json())))
}

impl CompiledStatement {
    /// Create a statement from its text and bound parameters
    pub fn new(text: impl Into<String>, params: PropertyMap) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    /// A statement that binds no values
    pub fn without_params(text: impl Into<String>) -> Self {
        Self::new(text, PropertyMap::new())
    }

    /// Get the value bound to parameter `name`
    pub fn param(&self, name: &str) -> Option<&PropertyValue> {
        self.params.get(name)
    }

    /// `{"query": ..., "params": ...}` for JSON transports
    pub fn to_json(&self) -> GraphResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
