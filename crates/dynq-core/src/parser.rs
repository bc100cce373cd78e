//! Key expression parsing.
//!
//! Two input forms are accepted:
//!
//! - shorthand `field=value`, always a single string-typed field;
//! - a JSON object of typed values, e.g. `{"environment": {"S": "gozer-dev"}}`.

use std::collections::BTreeMap;
use std::fmt;

use dynq_model::{AttributeValue, KeyDescriptor};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

/// A key expression as supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// `--key-value field=value`.
    KeyValue(String),
    /// `--query '<json>'`.
    Json(String),
}

impl QuerySource {
    /// Pick the key expression from the two mutually exclusive flags.
    ///
    /// # Errors
    /// [`ParseError::MissingQuery`] if neither is set,
    /// [`ParseError::ConflictingQuery`] if both are.
    pub fn from_flags(
        key_value: Option<&str>,
        query: Option<&str>,
    ) -> Result<Self, ParseError> {
        match (key_value, query) {
            (Some(kv), None) => Ok(Self::KeyValue(kv.to_owned())),
            (None, Some(q)) => Ok(Self::Json(q.to_owned())),
            (None, None) => Err(ParseError::MissingQuery),
            (Some(_), Some(_)) => Err(ParseError::ConflictingQuery),
        }
    }
}

/// Parse a key expression into a key descriptor.
///
/// # Errors
/// Returns a [`ParseError`] describing why the expression is not a key.
pub fn parse(source: &QuerySource) -> Result<KeyDescriptor, ParseError> {
    match source {
        QuerySource::KeyValue(raw) => parse_key_value(raw),
        QuerySource::Json(raw) => parse_query_json(raw),
    }
}

/// Parse `field=value`, splitting on the first `=` only.
///
/// # Errors
/// [`ParseError::MalformedKeyValue`] if there is no `=` or the field is empty.
pub fn parse_key_value(raw: &str) -> Result<KeyDescriptor, ParseError> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(ParseError::MalformedKeyValue(raw.to_owned()));
    };
    KeyDescriptor::string(field, value).map_err(|_| ParseError::MalformedKeyValue(raw.to_owned()))
}

/// Parse a JSON object of typed values.
///
/// # Errors
/// [`ParseError::MalformedQueryJson`] for invalid JSON, untyped values or a
/// repeated field name, [`ParseError::EmptyKey`] for `{}` or an empty field
/// name.
pub fn parse_query_json(raw: &str) -> Result<KeyDescriptor, ParseError> {
    let KeyFields(fields) = serde_json::from_str(raw)?;
    Ok(KeyDescriptor::from_fields(fields)?)
}

/// Key fields from a JSON object, refusing repeated names.
struct KeyFields(BTreeMap<String, AttributeValue>);

impl<'de> Deserialize<'de> for KeyFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyFieldsVisitor;

        impl<'de> Visitor<'de> for KeyFieldsVisitor {
            type Value = KeyFields;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of key field names to typed values")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<KeyFields, M::Error> {
                let mut fields = BTreeMap::new();
                while let Some((name, value)) = map.next_entry::<String, AttributeValue>()? {
                    if fields.contains_key(&name) {
                        return Err(de::Error::custom(format!("duplicate key field `{name}`")));
                    }
                    fields.insert(name, value);
                }
                Ok(KeyFields(fields))
            }
        }

        deserializer.deserialize_map(KeyFieldsVisitor)
    }
}
