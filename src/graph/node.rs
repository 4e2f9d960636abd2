//! Vertex entity
//!
//! Edges only need a vertex's server id, but callers usually hold the vertex
//! itself, so the edge constructors accept it directly.

use super::property::{PropertyMap, PropertyValue, Structure};
use super::tracked::TrackedProperties;
use super::types::{Label, NodeId};
use crate::error::{GraphError, GraphResult};

/// A vertex as seen by the client
#[derive(Debug, Clone)]
pub struct Node {
    id: Option<NodeId>,

    /// Labels attached to this vertex
    pub labels: Vec<Label>,

    properties: TrackedProperties,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Node {
    /// Structure signature of a vertex record ('N')
    pub const SIGNATURE: u8 = 0x4E;

    /// Create an unpersisted vertex
    pub fn new(labels: Vec<Label>) -> Self {
        Self::new_with_properties(labels, PropertyMap::new())
    }

    pub fn new_with_properties(labels: Vec<Label>, properties: PropertyMap) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Node {
            id: None,
            labels,
            properties: TrackedProperties::from_snapshot(properties),
            created_at: now,
            updated_at: now,
        }
    }

    /// A vertex known only by its server id
    pub fn with_id(id: NodeId, labels: Vec<Label>) -> Self {
        let mut node = Self::new(labels);
        node.id = Some(id);
        node
    }

    /// Decode a vertex record: `[id, labels, properties]`
    pub fn from_structure(structure: &Structure) -> GraphResult<Self> {
        let fields = structure.expect(Self::SIGNATURE, 3)?;

        let id = fields[0]
            .as_u64()
            .ok_or_else(|| GraphError::InvalidStructure("vertex id must be a non-negative integer".into()))?;
        let labels = fields[1]
            .as_list()
            .ok_or_else(|| GraphError::InvalidStructure("vertex labels must be a list".into()))?
            .iter()
            .map(|label| {
                label
                    .as_string()
                    .map(Label::new)
                    .ok_or_else(|| GraphError::InvalidStructure("vertex label must be a string".into()))
            })
            .collect::<GraphResult<Vec<_>>>()?;
        let properties = fields[2]
            .as_map()
            .ok_or_else(|| GraphError::InvalidStructure("vertex properties must be a map".into()))?
            .clone();

        let mut node = Self::new_with_properties(labels, properties);
        node.id = Some(NodeId::new(id));
        Ok(node)
    }

    /// Server id, absent until the vertex has been created
    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    /// Record the id the server assigned on creation
    pub fn assign_id(&mut self, id: NodeId) -> GraphResult<()> {
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

    /// Check if vertex has a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key, value);
        self.touch();
    }

    /// Clear a property
    pub fn remove_property(&mut self, key: impl Into<String>) {
        self.properties.remove(key);
        self.touch();
    }

    /// Get a property value, pending changes first
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Property snapshot and change overlay
    pub fn properties(&self) -> &TrackedProperties {
        &self.properties
    }

    /// Whether any property changed since construction or the last commit
    pub fn is_modified(&self) -> bool {
        self.properties.is_modified()
    }

    /// Clear the change overlay after the server applied it
    pub fn commit(&mut self) {
        self.properties.commit();
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}
