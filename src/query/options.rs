//! Compilation options

use serde::{Deserialize, Serialize};
use std::fmt;

/// The statement shape to compile for a single entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knobs shared by the single-entity compilers.
///
/// Missing fields fall back to the defaults when loaded from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Variable the relationship is bound to; empty means anonymous
    pub alias: String,

    /// Append a `RETURN` clause
    pub with_return: bool,

    /// Appended to every update parameter name
    pub param_suffix: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            alias: "rel".to_string(),
            with_return: true,
            param_suffix: String::new(),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_return(mut self, with_return: bool) -> Self {
        self.with_return = with_return;
        self
    }

    pub fn with_param_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.param_suffix = suffix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.alias, "rel");
        assert!(options.with_return);
        assert!(options.param_suffix.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{"with_return": false}"#).unwrap();
        assert_eq!(options, CompileOptions::new().with_return(false));
    }

    #[test]
    fn test_builder() {
        let options = CompileOptions::new().with_alias("r").with_param_suffix("3");
        assert_eq!(options.alias, "r");
        assert_eq!(options.param_suffix, "3");
        assert_eq!(Operation::Update.to_string(), "update");
    }
}
