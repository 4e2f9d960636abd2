//! Cypher Entity
//!
//! Client-side entity layer for graph databases that speak a Cypher-style
//! query language with named parameters and server-assigned internal ids.
//!
//! # Overview
//!
//! - [`graph`]: vertices and directed, typed edges whose properties are
//!   change-tracked, plus the property value type exchanged with the server
//! - [`query`]: pure compilers from an edge's state to a parameterized
//!   statement (create, update, delete, batched create)
//! - [`client`]: the transport seam and the create/update/delete lifecycle
//!
//! ## Example Usage
//!
//! ```rust
//! use cypher_entity::graph::{Direction, Edge, EdgeId, NodeId};
//! use cypher_entity::query::{compile_create, compile_update, CompileOptions};
//!
//! let mut edge = Edge::new(NodeId::new(10), NodeId::new(20), "LIKES", Direction::Forward);
//! edge.set_property("since", 2020i64);
//!
//! let create = compile_create(&edge, &CompileOptions::default());
//! assert!(create.text.contains("CREATE (fromNode)-[`rel`:`LIKES`{`since`: $since}]->(toNode)"));
//!
//! // after the server confirmed the create
//! edge.assign_id(EdgeId::new(99)).unwrap();
//! edge.commit();
//!
//! edge.set_property("since", 2021i64);
//! let update = compile_update(&edge, &CompileOptions::default()).unwrap();
//! assert!(update.text.contains("SET `rel`.`since` = $since"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod graph;
pub mod query;

pub use client::{EntityClient, GraphSession, Row};
pub use error::{GraphError, GraphResult};
pub use graph::{
    Direction, Edge, EdgeId, EdgeType, Endpoint, Label, Node, NodeId, PropertyMap, PropertyValue,
    Structure, TrackedProperties,
};
pub use query::{
    compile, compile_batch_create, compile_create, compile_delete, compile_update, CompileOptions,
    CompiledStatement, Operation,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
