//! AWS SDK backed store client for dynq.
//!
//! Everything transport related (credential resolution, signing, retries,
//! endpoint resolution, TLS) is left to `aws-config` and `aws-sdk-dynamodb`.
//! This crate only builds the SDK client and translates between its types
//! and the dynq model.
#![allow(clippy::doc_markdown)]

pub mod client;
pub mod convert;

pub use client::{DynamoDbItemClient, load_sdk_config};
