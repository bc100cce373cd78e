//! Conversion between the dynq model and the AWS SDK's attribute values.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use dynq_core::ClientError;
use dynq_model::{AttributeValue, Item, KeyDescriptor};

/// Key fields as the SDK expects them.
#[must_use]
pub fn key_to_sdk(key: &KeyDescriptor) -> HashMap<String, SdkValue> {
    key.iter()
        .map(|(name, value)| (name.to_owned(), value_to_sdk(value)))
        .collect()
}

/// Convert one model value into an SDK value.
#[must_use]
pub fn value_to_sdk(value: &AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s.clone()),
        AttributeValue::N(n) => SdkValue::N(n.clone()),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b.to_vec())),
        AttributeValue::Ss(v) => SdkValue::Ss(v.clone()),
        AttributeValue::Ns(v) => SdkValue::Ns(v.clone()),
        AttributeValue::Bs(v) => SdkValue::Bs(v.iter().map(|b| Blob::new(b.to_vec())).collect()),
        AttributeValue::Bool(b) => SdkValue::Bool(*b),
        AttributeValue::Null(b) => SdkValue::Null(*b),
        AttributeValue::L(list) => SdkValue::L(list.iter().map(value_to_sdk).collect()),
        AttributeValue::M(map) => SdkValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_sdk(v)))
                .collect(),
        ),
    }
}

/// Convert an SDK item into a model item.
///
/// The SDK returns an unordered map; fields are ordered by name so the same
/// item always prints the same way.
///
/// # Errors
/// Returns a [`ClientError`] if the response contains a type this client
/// does not know.
pub fn item_from_sdk(raw: HashMap<String, SdkValue>) -> Result<Item, ClientError> {
    let mut fields: Vec<(String, SdkValue)> = raw.into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    fields
        .into_iter()
        .map(|(name, value)| value_from_sdk(value).map(|v| (name, v)))
        .collect()
}

/// Convert one SDK value into a model value.
///
/// # Errors
/// Returns a [`ClientError`] for attribute types added to the SDK after this
/// client was written.
pub fn value_from_sdk(value: SdkValue) -> Result<AttributeValue, ClientError> {
    let converted = match value {
        SdkValue::S(s) => AttributeValue::S(s),
        SdkValue::N(n) => AttributeValue::N(n),
        SdkValue::B(b) => AttributeValue::B(bytes::Bytes::from(b.into_inner())),
        SdkValue::Ss(v) => AttributeValue::Ss(v),
        SdkValue::Ns(v) => AttributeValue::Ns(v),
        SdkValue::Bs(v) => AttributeValue::Bs(
            v.into_iter()
                .map(|b| bytes::Bytes::from(b.into_inner()))
                .collect(),
        ),
        SdkValue::Bool(b) => AttributeValue::Bool(b),
        SdkValue::Null(b) => AttributeValue::Null(b),
        SdkValue::L(list) => AttributeValue::L(
            list.into_iter()
                .map(value_from_sdk)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        SdkValue::M(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| value_from_sdk(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()?,
        ),
        other => {
            return Err(ClientError::new(format!(
                "unsupported attribute type in response: {other:?}"
            )));
        }
    };
    Ok(converted)
}
