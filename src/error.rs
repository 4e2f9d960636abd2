//! Error types for entity handling and statement compilation

use thiserror::Error;

/// Errors raised while building entities, compiling statements or
/// running them through a session
#[derive(Error, Debug)]
pub enum GraphError {
    /// Update or delete requested for an entity the server has not created yet
    #[error("cannot compile {operation} for a relationship without id; did you mean to create it?")]
    MissingIdentifier { operation: &'static str },

    /// Edge requested between vertices that have not been persisted
    #[error("{endpoint} vertex must have an id")]
    MissingEndpointId { endpoint: &'static str },

    /// Server ids are assigned once
    #[error("entity already has id {existing}, refusing to reassign it to {attempted}")]
    IdAlreadyAssigned { existing: u64, attempted: u64 },

    /// Create requested for an entity the server already holds
    #[error("relationship already has id {id}; update it instead of creating it again")]
    AlreadyPersisted { id: u64 },

    /// A resolved vertex does not carry the endpoint's id
    #[error("endpoint expects vertex {expected}, got {actual:?}")]
    EndpointMismatch { expected: u64, actual: Option<u64> },

    /// Decoded record has the wrong shape
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// Update and delete statements must be able to reference the relationship
    #[error("{operation} needs a non-empty relationship alias")]
    EmptyAlias { operation: &'static str },

    #[error("cannot compile an empty batch")]
    EmptyBatch,

    /// Transport failure reported by a session
    #[error("session error: {0}")]
    Session(String),

    /// A result row is missing a value the statement was expected to return
    #[error("missing return value: {0}")]
    MissingReturnValue(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
