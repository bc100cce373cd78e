//! DynamoDB data model for dynq.
//!
//! Typed attribute values with their single-key JSON encoding, the primary
//! key descriptor sent with a point read, and the item/outcome types that
//! come back. These types are hand-written; DynamoDB's JSON protocol maps
//! onto serde with a couple of custom visitors.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]

pub mod attribute_value;
pub mod item;
pub mod key;

pub use attribute_value::AttributeValue;
pub use item::{GetItemOutput, Item, LookupResult};
pub use key::{InvalidKey, KeyDescriptor};
