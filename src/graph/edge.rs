//! Edge entity
//!
//! A directed, typed relationship between two vertices, with dirty-tracked
//! properties. Edges are built fresh on the client (no id until the server
//! creates them) or decoded from a relationship record returned by the server.

use super::node::Node;
use super::property::{PropertyMap, PropertyValue, Structure};
use super::tracked::TrackedProperties;
use super::types::{EdgeId, EdgeType, NodeId};
use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which way the arrow points when the edge is rendered into a statement.
///
/// This never swaps which endpoint holds which id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// `(from)-[..]->(to)`
    #[default]
    Forward,
    /// `(from)<-[..]-(to)`
    Reverse,
}

/// One end of an edge: always an id, optionally the fetched vertex too
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Only the vertex id is known
    Unresolved(NodeId),
    /// The vertex has been fetched and is shared with the caller
    Resolved(NodeId, Arc<Node>),
}

impl Endpoint {
    pub fn id(&self) -> NodeId {
        match self {
            Endpoint::Unresolved(id) | Endpoint::Resolved(id, _) => *id,
        }
    }

    pub fn node(&self) -> Option<&Arc<Node>> {
        match self {
            Endpoint::Unresolved(_) => None,
            Endpoint::Resolved(_, node) => Some(node),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Endpoint::Resolved(..))
    }

    fn from_node(node: Arc<Node>, endpoint: &'static str) -> GraphResult<Self> {
        let id = node.id().ok_or(GraphError::MissingEndpointId { endpoint })?;
        Ok(Endpoint::Resolved(id, node))
    }

    fn resolve(&mut self, node: Arc<Node>) -> GraphResult<()> {
        let expected = self.id();
        if node.id() != Some(expected) {
            return Err(GraphError::EndpointMismatch {
                expected: expected.as_u64(),
                actual: node.id().map(|id| id.as_u64()),
            });
        }
        *self = Endpoint::Resolved(expected, node);
        Ok(())
    }
}

/// A directed relationship with change tracking
#[derive(Debug, Clone)]
pub struct Edge {
    id: Option<EdgeId>,
    from: Endpoint,
    to: Endpoint,
    label: EdgeType,
    label_modified: bool,
    direction: Direction,
    properties: TrackedProperties,

    /// Creation timestamp (Unix milliseconds); never sent to the server
    pub created_at: i64,

    /// Last local modification (Unix milliseconds); never sent to the server
    pub updated_at: i64,
}

impl Edge {
    /// Structure signature of a relationship record ('R')
    pub const SIGNATURE: u8 = 0x52;

    /// Create an unpersisted edge between two vertex ids
    pub fn new(from: NodeId, to: NodeId, label: impl Into<EdgeType>, direction: Direction) -> Self {
        Self::new_with_properties(from, to, label, direction, PropertyMap::new())
    }

    pub fn new_with_properties(
        from: NodeId,
        to: NodeId,
        label: impl Into<EdgeType>,
        direction: Direction,
        properties: PropertyMap,
    ) -> Self {
        Self::build(
            None,
            Endpoint::Unresolved(from),
            Endpoint::Unresolved(to),
            label.into(),
            direction,
            properties,
        )
    }

    /// Create an unpersisted edge between two persisted vertices.
    ///
    /// Fails when either vertex has no id yet.
    pub fn between(
        from: Arc<Node>,
        to: Arc<Node>,
        label: impl Into<EdgeType>,
        direction: Direction,
        properties: PropertyMap,
    ) -> GraphResult<Self> {
        let from = Endpoint::from_node(from, "from")?;
        let to = Endpoint::from_node(to, "to")?;
        Ok(Self::build(None, from, to, label.into(), direction, properties))
    }

    /// Decode a relationship record: `[id, from id, to id, type, properties]`.
    ///
    /// The result is persisted and clean, with `Direction::Forward`.
    pub fn from_structure(structure: &Structure) -> GraphResult<Self> {
        let fields = structure.expect(Self::SIGNATURE, 5)?;
        let id_field = |index: usize, what: &str| {
            fields[index].as_u64().ok_or_else(|| {
                GraphError::InvalidStructure(format!("{} must be a non-negative integer", what))
            })
        };

        let id = id_field(0, "relationship id")?;
        let from = id_field(1, "start vertex id")?;
        let to = id_field(2, "end vertex id")?;
        let label = fields[3]
            .as_string()
            .ok_or_else(|| GraphError::InvalidStructure("relationship type must be a string".into()))?;
        let properties = fields[4]
            .as_map()
            .ok_or_else(|| GraphError::InvalidStructure("relationship properties must be a map".into()))?
            .clone();

        Ok(Self::build(
            Some(EdgeId::new(id)),
            Endpoint::Unresolved(NodeId::new(from)),
            Endpoint::Unresolved(NodeId::new(to)),
            EdgeType::new(label),
            Direction::Forward,
            properties,
        ))
    }

    fn build(
        id: Option<EdgeId>,
        from: Endpoint,
        to: Endpoint,
        label: EdgeType,
        direction: Direction,
        properties: PropertyMap,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Edge {
            id,
            from,
            to,
            label,
            label_modified: false,
            direction,
            properties: TrackedProperties::from_snapshot(properties),
            created_at: now,
            updated_at: now,
        }
    }

    /// Server id, absent until the relationship has been created
    pub fn id(&self) -> Option<EdgeId> {
        self.id
    }

    /// Record the id the server assigned on creation.
    ///
    /// Assigning the same id again is a no-op; a different one is an error.
    pub fn assign_id(&mut self, id: EdgeId) -> GraphResult<()> {
        match self.id {
            Some(existing) if existing != id => Err(GraphError::IdAlreadyAssigned {
                existing: existing.as_u64(),
                attempted: id.as_u64(),
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    /// Id of the start vertex
    pub fn from_id(&self) -> NodeId {
        self.from.id()
    }

    /// Id of the end vertex
    pub fn to_id(&self) -> NodeId {
        self.to.id()
    }

    /// Start endpoint, with the vertex itself when resolved
    pub fn from_endpoint(&self) -> &Endpoint {
        &self.from
    }

    pub fn to_endpoint(&self) -> &Endpoint {
        &self.to
    }

    /// Attach the fetched start vertex; its id must match
    pub fn resolve_from(&mut self, node: Arc<Node>) -> GraphResult<()> {
        self.from.resolve(node)
    }

    /// Attach the fetched end vertex; its id must match
    pub fn resolve_to(&mut self, node: Arc<Node>) -> GraphResult<()> {
        self.to.resolve(node)
    }

    /// Relationship type
    pub fn label(&self) -> &EdgeType {
        &self.label
    }

    /// Change the relationship type; marks the edge modified
    pub fn set_label(&mut self, label: impl Into<EdgeType>) {
        self.label = label.into();
        self.label_modified = true;
        self.properties.mark_modified();
        self.touch();
    }

    /// Whether the relationship type changed since construction or the last commit
    pub fn label_modified(&self) -> bool {
        self.label_modified
    }

    /// Arrow direction used when the relationship pattern is rendered
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Not tracked: direction only affects how the pattern is written
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Set (`Some`) or clear (`None`) a property
    pub fn set(&mut self, key: impl Into<String>, value: Option<PropertyValue>) {
        self.properties.set(key, value);
        self.touch();
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.set(key, Some(value.into()));
    }

    /// Clear a property; the key is removed on the next update
    pub fn remove_property(&mut self, key: impl Into<String>) {
        self.set(key, None);
    }

    /// Current value of a property, pending changes first
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains(key)
    }

    /// Number of properties currently visible
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Property snapshot and change overlay
    pub fn properties(&self) -> &TrackedProperties {
        &self.properties
    }

    /// Whether anything changed since construction or the last commit
    pub fn is_modified(&self) -> bool {
        self.properties.is_modified()
    }

    /// Clear the change overlay after the server applied it.
    ///
    /// Compilation never does this on its own; a statement may be compiled
    /// again before it is executed.
    pub fn commit(&mut self) {
        self.properties.commit();
        self.label_modified = false;
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::Label;

    fn record(fields: Vec<PropertyValue>) -> Structure {
        Structure::new(Edge::SIGNATURE, fields)
    }

    #[test]
    fn test_new_edge_is_unpersisted_and_clean() {
        let edge = Edge::new(NodeId::new(10), NodeId::new(20), "LIKES", Direction::Forward);

        assert_eq!(edge.id(), None);
        assert_eq!(edge.from_id(), NodeId::new(10));
        assert_eq!(edge.to_id(), NodeId::new(20));
        assert_eq!(edge.label().as_str(), "LIKES");
        assert!(!edge.from_endpoint().is_resolved());
        assert!(!edge.is_modified());
    }

    #[test]
    fn test_between_requires_persisted_vertices() {
        let saved = Arc::new(Node::with_id(NodeId::new(1), vec![Label::new("Person")]));
        let unsaved = Arc::new(Node::new(vec![Label::new("Person")]));

        let err = Edge::between(saved.clone(), unsaved, "KNOWS", Direction::Forward, PropertyMap::new())
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingEndpointId { endpoint: "to" }));

        let edge = Edge::between(saved.clone(), saved, "KNOWS", Direction::Forward, PropertyMap::new())
            .unwrap();
        assert!(edge.from_endpoint().is_resolved());
        assert_eq!(edge.to_id(), NodeId::new(1));
    }

    #[test]
    fn test_decode_relationship_record() {
        let edge = Edge::from_structure(&record(vec![
            PropertyValue::Integer(7),
            PropertyValue::Integer(1),
            PropertyValue::Integer(2),
            "KNOWS".into(),
            PropertyValue::Map(PropertyMap::new()),
        ]))
        .unwrap();

        assert_eq!(edge.id(), Some(EdgeId::new(7)));
        assert_eq!(edge.from_id(), NodeId::new(1));
        assert_eq!(edge.to_id(), NodeId::new(2));
        assert_eq!(edge.label().as_str(), "KNOWS");
        assert_eq!(edge.direction(), Direction::Forward);
        assert_eq!(edge.property_count(), 0);
        assert!(!edge.is_modified());
        assert!(!edge.properties().has_pending_changes());
    }

    #[test]
    fn test_decode_rejects_malformed_records() {
        let wrong_tag = Structure::new(Node::SIGNATURE, vec![]);
        assert!(Edge::from_structure(&wrong_tag).is_err());

        let short = record(vec![PropertyValue::Integer(7)]);
        assert!(Edge::from_structure(&short).is_err());

        let bad_label = record(vec![
            PropertyValue::Integer(7),
            PropertyValue::Integer(1),
            PropertyValue::Integer(2),
            PropertyValue::Integer(3),
            PropertyValue::Map(PropertyMap::new()),
        ]);
        assert!(matches!(Edge::from_structure(&bad_label), Err(GraphError::InvalidStructure(_))));
    }

    #[test]
    fn test_set_then_remove_property() {
        let mut edge = Edge::new(NodeId::new(1), NodeId::new(2), "KNOWS", Direction::Forward);
        edge.set_property("since", 2020i64);
        edge.remove_property("since");

        assert!(!edge.has_property("since"));
        assert!(edge.get_property("since").is_none());
        assert!(edge.properties().removed().contains("since"));
        assert!(edge.is_modified());
    }

    #[test]
    fn test_label_change_marks_modified() {
        let mut edge = Edge::new(NodeId::new(1), NodeId::new(2), "KNOWS", Direction::Forward);
        edge.set_label("LIKES");

        assert!(edge.is_modified());
        assert!(edge.label_modified());

        edge.commit();
        assert!(!edge.is_modified());
        assert!(!edge.label_modified());
    }

    #[test]
    fn test_direction_is_not_a_property_change() {
        let mut edge = Edge::new(NodeId::new(1), NodeId::new(2), "KNOWS", Direction::Forward);
        edge.set_direction(Direction::Reverse);

        assert_eq!(edge.direction(), Direction::Reverse);
        assert_eq!(edge.from_id(), NodeId::new(1));
        assert!(!edge.is_modified());
    }

    #[test]
    fn test_resolve_endpoint() {
        let mut edge = Edge::new(NodeId::new(1), NodeId::new(2), "KNOWS", Direction::Forward);

        let other = Arc::new(Node::with_id(NodeId::new(9), vec![]));
        assert!(matches!(
            edge.resolve_to(other),
            Err(GraphError::EndpointMismatch { expected: 2, actual: Some(9) })
        ));

        let target = Arc::new(Node::with_id(NodeId::new(2), vec![]));
        edge.resolve_to(target).unwrap();
        assert!(edge.to_endpoint().is_resolved());
        assert_eq!(edge.to_endpoint().node().and_then(|n| n.id()), Some(NodeId::new(2)));
    }

    #[test]
    fn test_assign_id_once() {
        let mut edge = Edge::new(NodeId::new(1), NodeId::new(2), "KNOWS", Direction::Forward);
        edge.assign_id(EdgeId::new(99)).unwrap();
        assert_eq!(edge.id(), Some(EdgeId::new(99)));
        assert!(edge.assign_id(EdgeId::new(100)).is_err());
    }
}
