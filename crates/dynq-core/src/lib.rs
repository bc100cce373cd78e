//! dynq core: key expression parsing, the point-read pipeline, and result
//! rendering.
//!
//! The store itself is reached through the [`ItemClient`] trait; this crate
//! has no AWS dependency and is tested against an in-memory client.
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod render;

pub use client::ItemClient;
pub use config::{ConnectionConfig, DynqEnv, QueryConfig, RenderMode};
pub use error::{ClientError, DynqError, DynqResult, ParseError};
pub use parser::QuerySource;
pub use pipeline::QueryPipeline;
pub use render::{ExitStatus, Rendered, Stream};
