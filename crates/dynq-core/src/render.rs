//! Result rendering.
//!
//! Rendering is pure: it produces the complete text, the stream it belongs
//! on, and the exit status. Nothing is written until the whole output is
//! built.

use dynq_model::attribute_value::encode_binary;
use dynq_model::{AttributeValue, GetItemOutput, Item, KeyDescriptor, LookupResult};
use serde_json::Value;

use crate::config::RenderMode;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Item found and printed.
    Success,
    /// Item not found, or the client failed.
    Failure,
    /// Missing or malformed key expression.
    Usage,
}

impl ExitStatus {
    /// Numeric exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Usage => 2,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

/// Output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Fully rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text to write, including trailing newlines.
    pub output: String,
    /// Where to write it.
    pub stream: Stream,
    /// How the process should exit.
    pub exit_status: ExitStatus,
}

/// Render a lookup outcome.
///
/// `key` is only used for the not-found diagnostic.
#[must_use]
pub fn render(result: &LookupResult, key: &KeyDescriptor, mode: RenderMode) -> Rendered {
    match result {
        LookupResult::NotFound => Rendered {
            output: format!("No such item found for: {key}\n"),
            stream: Stream::Stderr,
            exit_status: ExitStatus::Failure,
        },
        LookupResult::Found(item) => Rendered {
            output: match mode {
                RenderMode::Json => render_json(item),
                RenderMode::Shell => render_shell(item),
            },
            stream: Stream::Stdout,
            exit_status: ExitStatus::Success,
        },
    }
}

fn render_json(item: &Item) -> String {
    let mut out = serde_json::to_string(&GetItemOutput { item }).unwrap_or_default();
    out.push('\n');
    out
}

fn render_shell(item: &Item) -> String {
    let mut out = String::new();
    for (field, value) in item.iter() {
        out.push_str(&escape_line_breaks(field));
        out.push('=');
        out.push_str(&escape_line_breaks(&shell_value(value)));
        out.push('\n');
    }
    out
}

/// Replace CR and LF with `\r` and `\n` so every field stays on one line.
fn escape_line_breaks(s: &str) -> String {
    if !s.contains(['\n', '\r']) {
        return s.to_owned();
    }
    s.replace('\n', "\\n").replace('\r', "\\r")
}

/// The value with its type tag stripped.
///
/// Scalars print raw; sets print as JSON arrays of raw strings; lists and
/// maps print as compact JSON that keeps the inner type tags.
#[must_use]
pub fn shell_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => s.clone(),
        AttributeValue::B(b) => encode_binary(b),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Null(_) => "null".to_owned(),
        AttributeValue::Ss(v) | AttributeValue::Ns(v) => Value::from(v.clone()).to_string(),
        AttributeValue::Bs(v) => {
            Value::from(v.iter().map(|b| encode_binary(b)).collect::<Vec<_>>()).to_string()
        }
        AttributeValue::L(list) => serde_json::to_string(list).unwrap_or_default(),
        AttributeValue::M(map) => serde_json::to_string(map).unwrap_or_default(),
    }
}
