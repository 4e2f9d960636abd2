//! Property values exchanged with the graph server
//!
//! `PropertyValue` is the closed set of values a statement parameter or a
//! decoded result field can hold. Entities stay generic over the variants and
//! never assume a single primitive type.

use crate::error::{GraphError, GraphResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property map for vertex and edge properties.
///
/// Iteration follows insertion order, which keeps compiled statement text
/// reproducible.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A value that can be bound as a statement parameter or decoded from a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(PropertyMap),
    /// Tagged positional record (vertex, relationship, path, ...)
    Structure(Structure),
}

/// A structural record as decoded by the protocol layer: a one-byte
/// signature plus positional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub signature: u8,
    pub fields: Vec<PropertyValue>,
}

impl Structure {
    /// Create a structure from its signature and positional fields
    pub fn new(signature: u8, fields: Vec<PropertyValue>) -> Self {
        Structure { signature, fields }
    }

    /// Check the signature and minimum arity, returning the fields on success
    pub fn expect(&self, signature: u8, min_fields: usize) -> GraphResult<&[PropertyValue]> {
        if self.signature != signature {
            return Err(GraphError::InvalidStructure(format!(
                "expected signature {:#04x}, found {:#04x}",
                signature, self.signature
            )));
        }
        if self.fields.len() < min_fields {
            return Err(GraphError::InvalidStructure(format!(
                "signature {:#04x} needs {} fields, found {}",
                signature,
                min_fields,
                self.fields.len()
            )));
        }
        Ok(&self.fields)
    }
}

impl PropertyValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer value as an unsigned identifier; negative integers yield `None`
    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer().and_then(|i| u64::try_from(i).ok())
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get list items if this is a list
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get map value if this is a map
    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the structural record if this is one
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            PropertyValue::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "Null",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::String(_) => "String",
            PropertyValue::List(_) => "List",
            PropertyValue::Map(_) => "Map",
            PropertyValue::Structure(_) => "Structure",
        }
    }

    /// Plain JSON form used on the wire.
    ///
    /// Scalars, lists and maps map onto their JSON counterparts; non-finite
    /// floats become `null`. Structures stay explicit as
    /// `{"signature": n, "fields": [...]}`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            PropertyValue::Null => Value::Null,
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::Integer(i) => Value::from(*i),
            PropertyValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::List(items) => Value::Array(items.iter().map(PropertyValue::to_json).collect()),
            PropertyValue::Map(map) => Value::Object(
                map.iter().map(|(key, val)| (key.clone(), val.to_json())).collect(),
            ),
            PropertyValue::Structure(s) => serde_json::json!({
                "signature": s.signature,
                "fields": s.fields.iter().map(PropertyValue::to_json).collect::<Vec<_>>(),
            }),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "{:?}", s),
            PropertyValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            PropertyValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
            PropertyValue::Structure(s) => {
                write!(f, "Structure({:#04x}", s.signature)?;
                for field in &s.fields {
                    write!(f, ", {}", field)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::List(items)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Map(map)
    }
}

impl From<Structure> for PropertyValue {
    fn from(s: Structure) -> Self {
        PropertyValue::Structure(s)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let s: PropertyValue = "hello".into();
        assert_eq!(s.as_string(), Some("hello"));

        let i: PropertyValue = 42i64.into();
        assert_eq!(i.as_integer(), Some(42));
        assert_eq!(i.as_u64(), Some(42));

        let f: PropertyValue = 0.5.into();
        assert_eq!(f.as_float(), Some(0.5));

        let none: PropertyValue = Option::<i64>::None.into();
        assert!(none.is_null());
    }

    #[test]
    fn test_negative_integer_is_not_an_id() {
        assert_eq!(PropertyValue::Integer(-1).as_u64(), None);
        assert_eq!(PropertyValue::String("1".into()).as_u64(), None);
    }

    #[test]
    fn test_property_map_keeps_insertion_order() {
        let mut props = PropertyMap::new();
        props.insert("zeta".to_string(), 1i64.into());
        props.insert("alpha".to_string(), 2i64.into());
        props.insert("mid".to_string(), 3i64.into());

        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_structure_expect() {
        let s = Structure::new(0x52, vec![PropertyValue::Integer(1)]);
        assert_eq!(s.expect(0x52, 1).unwrap().len(), 1);
        assert!(matches!(s.expect(0x4E, 1), Err(GraphError::InvalidStructure(_))));
        assert!(matches!(s.expect(0x52, 5), Err(GraphError::InvalidStructure(_))));
    }

    #[test]
    fn test_to_json_plain_values() {
        assert_eq!(PropertyValue::Integer(2020).to_json(), serde_json::json!(2020));
        assert_eq!(PropertyValue::from("x").to_json(), serde_json::json!("x"));
        assert_eq!(PropertyValue::Float(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(
            PropertyValue::List(vec![true.into(), PropertyValue::Null]).to_json(),
            serde_json::json!([true, null])
        );
    }

    #[test]
    fn test_display() {
        let value = PropertyValue::List(vec![1i64.into(), "a".into(), PropertyValue::Null]);
        assert_eq!(value.to_string(), "[1, \"a\", null]");
        assert_eq!(PropertyValue::Map(PropertyMap::new()).type_name(), "Map");
    }
}
