//! Client-side property graph entities
//!
//! - Vertices and directed, typed edges
//! - Property values crossing the protocol boundary
//! - Change tracking used to compile minimal update statements

pub mod edge;
pub mod node;
pub mod property;
pub mod tracked;
pub mod types;

pub use edge::{Direction, Edge, Endpoint};
pub use node::Node;
pub use property::{PropertyMap, PropertyValue, Structure};
pub use tracked::TrackedProperties;
pub use types::{EdgeId, EdgeType, Label, NodeId};
