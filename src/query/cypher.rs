//! Text fragments of the target query language
//!
//! Every user-supplied name (alias, relationship type, property key) goes
//! through [`quote_identifier`]; every value goes through a `$` parameter.
//! Only internal numeric ids are written into the text directly.

use crate::graph::{Direction, EdgeType};

/// Backtick-quote a name, doubling embedded backticks.
///
/// An empty name renders as ``` `` ```, which the server rejects; passing one
/// is a caller error that the compiler logs but does not stop.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quoted alias, or `None` for the empty alias
pub fn quote_alias(alias: &str) -> Option<String> {
    if alias.is_empty() {
        None
    } else {
        Some(quote_identifier(alias))
    }
}

/// Letters, digits and underscores, not starting with a digit
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Reference to a bound parameter: `$name`, or ``$`name` `` when quoting is needed
pub fn parameter_ref(name: &str) -> String {
    if is_plain_identifier(name) {
        format!("${}", name)
    } else {
        format!("${}", quote_identifier(name))
    }
}

/// `MATCH (alias) WHERE id(alias) = <id>`
pub fn match_vertex_by_id(alias: &str, id: u64) -> String {
    format!("MATCH ({alias}) WHERE id({alias}) = {id}")
}

/// Direction-agnostic relationship lookup by internal id
pub fn match_relationship_by_id(alias: &str, id: u64) -> String {
    format!("MATCH ()-[{alias}]->()\nWHERE id({alias}) = {id}")
}

/// `{`key`: $param, ...}` for (property key, parameter name) pairs, or an
/// empty string when there are none
pub fn property_literal<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let body = entries
        .into_iter()
        .map(|(key, param)| format!("{}: {}", quote_identifier(key), parameter_ref(param)))
        .collect::<Vec<_>>()
        .join(", ");
    if body.is_empty() {
        body
    } else {
        format!("{{{}}}", body)
    }
}

/// `(from)-[alias:`TYPE`{...}]->(to)`, mirrored for `Direction::Reverse`
pub fn relationship_pattern(
    from: &str,
    to: &str,
    alias: Option<&str>,
    label: &EdgeType,
    properties: &str,
    direction: Direction,
) -> String {
    let body = format!(
        "{}:{}{}",
        alias.unwrap_or(""),
        quote_identifier(label.as_str()),
        properties
    );
    match direction {
        Direction::Forward => format!("({from})-[{body}]->({to})"),
        Direction::Reverse => format!("({from})<-[{body}]-({to})"),
    }
}
