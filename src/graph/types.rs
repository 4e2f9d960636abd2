//! Identifier and name types shared by vertices and edges

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! internal_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

internal_id!(
    /// Server-assigned internal identifier of a vertex
    NodeId
);

internal_id!(
    /// Server-assigned internal identifier of a relationship
    EdgeId
);

/// Vertex label (e.g., "Person")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}

/// Relationship type name (e.g., "KNOWS", "LIKES")
///
/// This is the edge's label in the query language; it is rendered
/// backtick-quoted so any text is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeType(String);

impl EdgeType {
    pub fn new(edge_type: impl Into<String>) -> Self {
        EdgeType(edge_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EdgeType {
    fn from(s: String) -> Self {
        EdgeType(s)
    }
}

impl From<&str> for EdgeType {
    fn from(s: &str) -> Self {
        EdgeType(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_ids() {
        let node = NodeId::new(42);
        assert_eq!(node.as_u64(), 42);
        assert_eq!(node.to_string(), "NodeId(42)");

        let edge: EdgeId = 99.into();
        assert_eq!(edge.as_u64(), 99);
        assert_eq!(edge.to_string(), "EdgeId(99)");
        assert!(NodeId::new(1) < NodeId::new(2));
    }

    #[test]
    fn test_names() {
        let label: Label = "Person".into();
        assert_eq!(label.as_str(), "Person");
        assert_eq!(label.to_string(), "Person");

        let edge_type = EdgeType::new("KNOWS");
        assert_eq!(edge_type.as_str(), "KNOWS");
        assert_eq!(EdgeType::from(String::from("KNOWS")), edge_type);
    }
}
