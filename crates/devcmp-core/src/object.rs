//! NamedObject and ObjectList

use crate::error::{ObjectError, ObjectResult};
use crate::NAME_KEY;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Which of the two compared lists an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListSide {
    A,
    B,
}

impl ListSide {
    /// The opposing list
    pub fn other(self) -> Self {
        match self {
            ListSide::A => ListSide::B,
            ListSide::B => ListSide::A,
        }
    }
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListSide::A => write!(f, "A"),
            ListSide::B => write!(f, "B"),
        }
    }
}

/// A configuration object (tag, address, policy, ...) keyed by its `name`
///
/// The payload is kept as raw JSON so every object category shares one type.
/// Construction does not require a name; [`validate_names`] reports entries
/// without one before a comparison starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedObject(Map<String, Value>);

/// Ordered list of objects fetched from one device
pub type ObjectList = Vec<NamedObject>;

impl NamedObject {
    /// Create an object holding only a name
    pub fn new(name: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(NAME_KEY.to_string(), Value::String(name.into()));
        Self(map)
    }

    /// Wrap an existing JSON map
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The object's name, if present as a non-empty string
    pub fn name(&self) -> Option<&str> {
        match self.0.get(NAME_KEY) {
            Some(Value::String(name)) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Payload fields, i.e. every key except `name`
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter().filter(|(k, _)| k.as_str() != NAME_KEY)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for NamedObject {
    type Error = ObjectError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ObjectError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

impl From<NamedObject> for Value {
    fn from(object: NamedObject) -> Value {
        Value::Object(object.0)
    }
}

/// Short description of a JSON value's type, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check that every entry of `list` carries a name
///
/// Reports the first offending index.
pub fn validate_names(list: &[NamedObject], side: ListSide) -> ObjectResult<()> {
    match list.iter().position(|object| object.name().is_none()) {
        Some(index) => Err(ObjectError::MissingName { side, index }),
        None => Ok(()),
    }
}

/// Find every name that occurs more than once in `list`
///
/// Returns one error per repeated occurrence, pointing back at the first index.
/// Entries without a name are ignored here.
pub fn find_duplicate_names(list: &[NamedObject], side: ListSide) -> Vec<ObjectError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (index, object) in list.iter().enumerate() {
        let Some(name) = object.name() else {
            continue;
        };
        match seen.get(name) {
            Some(&first) => duplicates.push(ObjectError::DuplicateName {
                side,
                name: name.to_string(),
                first,
                duplicate: index,
            }),
            None => {
                seen.insert(name, index);
            }
        }
    }

    duplicates
}
