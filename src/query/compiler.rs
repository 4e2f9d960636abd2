//! Statement compiler for single edges
//!
//! Pure functions from an [`Edge`]'s current state to a
//! [`CompiledStatement`]. Nothing here mutates the edge: after the statement
//! has been executed successfully the caller commits the edge.

use super::cypher;
use super::options::{CompileOptions, Operation};
use super::statement::CompiledStatement;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, EdgeId, PropertyMap};
use tracing::{debug, warn};

/// Endpoint variable names used by single-edge create statements
pub const FROM_ALIAS: &str = "fromNode";
pub const TO_ALIAS: &str = "toNode";

/// Compile `operation` for `edge`
pub fn compile(edge: &Edge, operation: Operation, options: &CompileOptions) -> GraphResult<CompiledStatement> {
    match operation {
        Operation::Create => Ok(compile_create(edge, options)),
        Operation::Update => compile_update(edge, options),
        Operation::Delete => compile_delete(edge, options),
    }
}

/// Create the relationship between its two endpoints, binding every current
/// property as a parameter named after its key.
pub fn compile_create(edge: &Edge, options: &CompileOptions) -> CompiledStatement {
    if let Some(id) = edge.id() {
        warn!(edge_id = id.as_u64(), "compiling create for a relationship that already has an id");
    }
    warn_on_empty_names(edge);

    let alias = cypher::quote_alias(&options.alias);
    let mut params = PropertyMap::new();
    let properties = bind_properties(edge.properties().properties(), &mut params, |key, _| key.to_string());

    let mut lines = vec![
        cypher::match_vertex_by_id(FROM_ALIAS, edge.from_id().as_u64()),
        cypher::match_vertex_by_id(TO_ALIAS, edge.to_id().as_u64()),
        format!(
            "CREATE {}",
            cypher::relationship_pattern(
                FROM_ALIAS,
                TO_ALIAS,
                alias.as_deref(),
                edge.label(),
                &properties,
                edge.direction(),
            )
        ),
    ];
    if options.with_return {
        let mut items: Vec<&str> = alias.as_deref().into_iter().collect();
        items.extend([FROM_ALIAS, TO_ALIAS]);
        lines.push(format!("RETURN {}", items.join(", ")));
    }

    debug!(
        operation = "create",
        label = edge.label().as_str(),
        params = params.len(),
        "compiled relationship statement"
    );
    CompiledStatement::new(lines.join("\n"), params)
}

/// `SET`/`REMOVE` exactly the properties changed since the last commit.
///
/// Fails without an id or with an empty alias.
pub fn compile_update(edge: &Edge, options: &CompileOptions) -> GraphResult<CompiledStatement> {
    let (id, alias) = persisted_target(edge, &options.alias, Operation::Update)?;
    if edge.label_modified() {
        warn!(
            edge_id = id.as_u64(),
            label = edge.label().as_str(),
            "relationship type changes cannot be expressed in an update; recreate the relationship"
        );
    }

    let tracked = edge.properties();
    let mut params = PropertyMap::new();
    let mut lines = vec![cypher::match_relationship_by_id(&alias, id.as_u64())];

    if !tracked.updated().is_empty() {
        let assignments = tracked
            .updated()
            .iter()
            .map(|(key, value)| {
                let name = format!("{}{}", key, options.param_suffix);
                let assignment = format!(
                    "{}.{} = {}",
                    alias,
                    cypher::quote_identifier(key),
                    cypher::parameter_ref(&name)
                );
                params.insert(name, value.clone());
                assignment
            })
            .collect::<Vec<_>>();
        lines.push(format!("SET {}", assignments.join(", ")));
    }

    if !tracked.removed().is_empty() {
        let removals = tracked
            .removed()
            .iter()
            .map(|key| format!("{}.{}", alias, cypher::quote_identifier(key)))
            .collect::<Vec<_>>();
        lines.push(format!("REMOVE {}", removals.join(", ")));
    }

    if options.with_return {
        lines.push(format!("RETURN {}", alias));
    }

    debug!(
        operation = "update",
        edge_id = id.as_u64(),
        set = tracked.updated().len(),
        removed = tracked.removed().len(),
        "compiled relationship statement"
    );
    Ok(CompiledStatement::new(lines.join("\n"), params))
}

/// Delete the relationship by id. Binds no parameters.
pub fn compile_delete(edge: &Edge, options: &CompileOptions) -> GraphResult<CompiledStatement> {
    let (id, alias) = persisted_target(edge, &options.alias, Operation::Delete)?;
    let text = format!(
        "{}\nDELETE {}",
        cypher::match_relationship_by_id(&alias, id.as_u64()),
        alias
    );

    debug!(operation = "delete", edge_id = id.as_u64(), "compiled relationship statement");
    Ok(CompiledStatement::without_params(text))
}

/// The id and quoted alias an update/delete statement targets
fn persisted_target(edge: &Edge, alias: &str, operation: Operation) -> GraphResult<(EdgeId, String)> {
    let id = edge.id().ok_or_else(|| {
        warn!(%operation, label = edge.label().as_str(), "relationship has no id");
        GraphError::MissingIdentifier {
            operation: operation.as_str(),
        }
    })?;
    let alias = cypher::quote_alias(alias).ok_or(GraphError::EmptyAlias {
        operation: operation.as_str(),
    })?;
    Ok((id, alias))
}

/// Empty relationship types and property keys still compile, but the
/// server will refuse the statement
pub(crate) fn warn_on_empty_names(edge: &Edge) {
    if edge.label().as_str().is_empty() {
        warn!("relationship type is empty");
    }
    if edge.properties().properties().contains_key("") {
        warn!(label = edge.label().as_str(), "relationship has an empty property key");
    }
}

/// Bind each property under the name chosen by `name_for` and return the
/// property literal referencing those names.
///
/// `name_for` sees the parameters bound so far so it can avoid collisions.
pub(crate) fn bind_properties<F>(properties: &PropertyMap, params: &mut PropertyMap, mut name_for: F) -> String
where
    F: FnMut(&str, &PropertyMap) -> String,
{
    let mut entries = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        let name = name_for(key, params);
        params.insert(name.clone(), value.clone());
        entries.push((key.as_str(), name));
    }
    cypher::property_literal(entries.iter().map(|(key, name)| (*key, name.as_str())))
}
