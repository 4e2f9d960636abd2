//! Executing compiled statements
//!
//! The transport itself lives outside this crate behind [`GraphSession`].
//! [`EntityClient`] drives the entity lifecycle around it: compile, run,
//! then assign the returned id and commit the change overlay only once the
//! server has accepted the statement.

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, EdgeId, PropertyValue};
use crate::query::{batch_alias, compile_batch_create, compile_create, compile_delete, compile_update};
use crate::query::{CompileOptions, CompiledStatement};

/// One result row: column name to decoded value
pub type Row = IndexMap<String, PropertyValue>;

/// Transport that executes a compiled statement and returns decoded rows
#[async_trait]
pub trait GraphSession: Send + Sync {
    async fn run(&self, statement: &CompiledStatement) -> GraphResult<Vec<Row>>;
}

/// Persists edges through a [`GraphSession`]
pub struct EntityClient<S> {
    session: S,
    options: CompileOptions,
}

impl<S: GraphSession> EntityClient<S> {
    /// Client with the default compile options
    pub fn new(session: S) -> Self {
        Self::with_options(session, CompileOptions::default())
    }

    pub fn with_options(session: S, options: CompileOptions) -> Self {
        Self { session, options }
    }

    /// Get the underlying session
    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Create `edge`, then record its new id and commit it
    pub async fn create_edge(&self, edge: &mut Edge) -> GraphResult<EdgeId> {
        if self.options.alias.is_empty() {
            return Err(GraphError::EmptyAlias { operation: "create" });
        }
        ensure_unpersisted(edge)?;
        let options = self.options.clone().with_return(true);
        let statement = compile_create(edge, &options);
        let rows = self.session.run(&statement).await?;

        let id = returned_edge_id(&rows, &options.alias)?;
        edge.assign_id(id)?;
        edge.commit();
        info!(edge_id = id.as_u64(), label = edge.label().as_str(), "created relationship");
        Ok(id)
    }

    /// Create all `edges` in one statement, then record ids and commit each.
    ///
    /// Either every edge receives its id or none is touched.
    pub async fn create_edges(&self, edges: &mut [Edge]) -> GraphResult<Vec<EdgeId>> {
        for edge in edges.iter() {
            ensure_unpersisted(edge)?;
        }
        let statement = compile_batch_create(edges, true)?;
        let rows = self.session.run(&statement).await?;

        let ids = (1..=edges.len())
            .map(|position| returned_edge_id(&rows, &batch_alias(position)))
            .collect::<GraphResult<Vec<_>>>()?;
        for (edge, id) in edges.iter_mut().zip(&ids) {
            // cannot fail: every edge was checked to have no id
            edge.assign_id(*id)?;
            edge.commit();
        }
        info!(count = ids.len(), "created relationships");
        Ok(ids)
    }

    /// Send the pending property changes of `edge`, then commit it.
    ///
    /// Nothing is sent when there are no pending changes.
    pub async fn update_edge(&self, edge: &mut Edge) -> GraphResult<()> {
        let statement = compile_update(edge, &self.options)?;
        if edge.properties().has_pending_changes() {
            self.session.run(&statement).await?;
        } else {
            debug!(edge_id = ?edge.id().map(|id| id.as_u64()), "no pending relationship changes");
        }
        edge.commit();
        Ok(())
    }

    /// Delete the persisted `edge`
    pub async fn delete_edge(&self, edge: &Edge) -> GraphResult<()> {
        let statement = compile_delete(edge, &self.options)?;
        self.session.run(&statement).await?;
        info!(edge_id = ?edge.id().map(|id| id.as_u64()), "deleted relationship");
        Ok(())
    }
}

/// Creating an edge twice would duplicate the relationship on the server
fn ensure_unpersisted(edge: &Edge) -> GraphResult<()> {
    match edge.id() {
        Some(id) => Err(GraphError::AlreadyPersisted { id: id.as_u64() }),
        None => Ok(()),
    }
}

/// Id of the relationship returned under `alias` in the first row
fn returned_edge_id(rows: &[Row], alias: &str) -> GraphResult<EdgeId> {
    let structure = rows
        .first()
        .and_then(|row| row.get(alias))
        .and_then(PropertyValue::as_structure)
        .ok_or_else(|| GraphError::MissingReturnValue(format!("relationship `{}`", alias)))?;
    Edge::from_structure(structure)?
        .id()
        .ok_or_else(|| GraphError::MissingReturnValue(format!("id of relationship `{}`", alias)))
}
