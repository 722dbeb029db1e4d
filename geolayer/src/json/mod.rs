//! Generic JSON value tree and its parser.
//!
//! See [`parse`] for the entry point.

use std::fmt::{Display, Formatter, Write};

use indexmap::IndexMap;

mod parser;

pub use parser::{parse, parse_with_options, ParseOptions, DEFAULT_MAX_DEPTH};

/// A parsed JSON value.
///
/// Numbers are always stored as finite `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any JSON number.
    Number(f64),
    /// String with all escape sequences decoded.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<JsonValue>),
    /// Object with members in the order of their appearance in the text.
    Object(JsonObject),
}

impl JsonValue {
    /// Human readable name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Returns true if the value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns the boolean if the value is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number if the value is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string if the value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the array items if the value is an array.
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the object if the value is one.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(v) => Some(v),
            _ => None,
        }
    }
}

/// JSON object that keeps its members in insertion order.
///
/// Equality does not depend on the member order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    members: IndexMap<String, JsonValue>,
}

impl JsonObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a member. If the key is already present, its value is replaced in place and the
    /// old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.members.insert(key.into(), value)
    }

    /// Value of the member with the given key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.members.get(key)
    }

    /// Whether the object has a member with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the object has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonObject {
    fn from_iter<T: IntoIterator<Item = (K, JsonValue)>>(iter: T) -> Self {
        let mut object = JsonObject::new();
        for (key, value) in iter {
            object.insert(key, value);
        }

        object
    }
}

impl Display for JsonValue {
    /// Writes the value as compact JSON text.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(v) => write!(f, "{v}"),
            JsonValue::Number(v) => write!(f, "{v}"),
            JsonValue::String(v) => write_escaped(f, v),
            JsonValue::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            JsonValue::Object(object) => write!(f, "{object}"),
        }
    }
}

impl Display for JsonObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_escaped(f, key)?;
            write!(f, ":{value}")?;
        }
        f.write_char('}')
    }
}

fn write_escaped(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(feature = "serde")]
mod serialization {
    use serde::ser::{SerializeMap, SerializeSeq};
    use serde::{Serialize, Serializer};

    use super::{JsonObject, JsonValue};

    impl Serialize for JsonValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                JsonValue::Null => serializer.serialize_unit(),
                JsonValue::Bool(v) => serializer.serialize_bool(*v),
                JsonValue::Number(v) => serializer.serialize_f64(*v),
                JsonValue::String(v) => serializer.serialize_str(v),
                JsonValue::Array(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                JsonValue::Object(object) => object.serialize(serializer),
            }
        }
    }

    impl Serialize for JsonObject {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}
