//! Primary key descriptor for a point read.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::attribute_value::AttributeValue;

/// The full primary key of one item: field name to typed value.
///
/// Fields are kept ordered by name, so the canonical JSON form
/// (`{"environment":{"S":"gozer-dev"}}`) is identical for equal keys no
/// matter how they were constructed. Construction goes through
/// [`KeyDescriptor::from_fields`], which rejects empty keys and empty field
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyDescriptor(BTreeMap<String, AttributeValue>);

/// Reason a set of fields cannot form a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKey {
    /// No fields at all.
    Empty,
    /// A field with an empty name.
    EmptyFieldName,
}

impl KeyDescriptor {
    /// Build a key from `(field, value)` pairs.
    ///
    /// # Errors
    /// Returns [`InvalidKey`] if there are no fields or a field name is empty.
    pub fn from_fields<I, K>(fields: I) -> Result<Self, InvalidKey>
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, value) in fields {
            let name = name.into();
            if name.is_empty() {
                return Err(InvalidKey::EmptyFieldName);
            }
            map.insert(name, value);
        }
        if map.is_empty() {
            return Err(InvalidKey::Empty);
        }
        Ok(Self(map))
    }

    /// Single string-typed field, the shape produced by `field=value`.
    ///
    /// # Errors
    /// Returns [`InvalidKey::EmptyFieldName`] if `field` is empty.
    pub fn string(field: impl Into<String>, value: impl Into<String>) -> Result<Self, InvalidKey> {
        Self::from_fields([(field.into(), AttributeValue::S(value.into()))])
    }

    /// Iterate over the key fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up one key field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&AttributeValue> {
        self.0.get(field)
    }

    /// Number of key fields (1 for a partition key, 2 with a sort key).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no fields. Never true for a constructed key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical one-line JSON encoding with typed values.
    #[must_use]
    pub fn to_canonical_json(&self) -> String {
        // A map of strings to AttributeValue cannot fail to serialize.
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_json())
    }
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("key must contain at least one field"),
            Self::EmptyFieldName => f.write_str("key field name must not be empty"),
        }
    }
}

impl std::error::Error for InvalidKey {}
