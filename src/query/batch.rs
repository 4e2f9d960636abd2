//! Batched relationship creation
//!
//! Folds any number of pending edges into one `CREATE` statement. The edge at
//! 1-based position `i` uses the variables `rel<i>`, `fromNode<i>`,
//! `toNode<i>` and parameters named `<key><i>`, so edges sharing property
//! keys never overwrite each other's values.

use super::compiler::{bind_properties, warn_on_empty_names, FROM_ALIAS, TO_ALIAS};
use super::cypher;
use super::statement::CompiledStatement;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, PropertyMap};
use tracing::{debug, warn};

/// Relationship variable of the edge at 1-based `position`
pub fn batch_alias(position: usize) -> String {
    format!("rel{}", position)
}

/// `<key><position>`, falling back to `<key>_<position>` (then more
/// underscores) when that name is already bound, e.g. key `a1` at position 1
/// against key `a` at position 11.
fn parameter_name(key: &str, position: usize, bound: &PropertyMap) -> String {
    let mut separator = String::new();
    loop {
        let name = format!("{}{}{}", key, separator, position);
        if !bound.contains_key(&name) {
            return name;
        }
        separator.push('_');
    }
}

/// Compile one statement creating every edge in `edges`, in order
pub fn compile_batch_create(edges: &[Edge], with_return: bool) -> GraphResult<CompiledStatement> {
    if edges.is_empty() {
        return Err(GraphError::EmptyBatch);
    }

    let mut params = PropertyMap::new();
    let mut matches = Vec::with_capacity(edges.len() * 2);
    let mut patterns = Vec::with_capacity(edges.len());
    let mut returns = Vec::with_capacity(edges.len() * 3);

    for (index, edge) in edges.iter().enumerate() {
        let position = index + 1;
        if let Some(id) = edge.id() {
            warn!(position, edge_id = id.as_u64(), "batched create includes a relationship that already has an id");
        }
        warn_on_empty_names(edge);

        let rel = cypher::quote_identifier(&batch_alias(position));
        let from = format!("{}{}", FROM_ALIAS, position);
        let to = format!("{}{}", TO_ALIAS, position);

        let properties = bind_properties(edge.properties().properties(), &mut params, |key, bound| {
            parameter_name(key, position, bound)
        });

        matches.push(cypher::match_vertex_by_id(&from, edge.from_id().as_u64()));
        matches.push(cypher::match_vertex_by_id(&to, edge.to_id().as_u64()));
        patterns.push(cypher::relationship_pattern(
            &from,
            &to,
            Some(rel.as_str()),
            edge.label(),
            &properties,
            edge.direction(),
        ));
        returns.extend([rel, from, to]);
    }

    let mut text = format!("{}\nCREATE {}", matches.join("\n"), patterns.join(",\n  "));
    if with_return {
        text.push_str("\nRETURN ");
        text.push_str(&returns.join(", "));
    }

    debug!(operation = "batch_create", edges = edges.len(), params = params.len(), "compiled relationship statement");
    Ok(CompiledStatement::new(text, params))
}
