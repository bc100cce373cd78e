//! Configuration assembled once at startup and passed into the pipeline.
//!
//! Nothing under this crate reads the environment except
//! [`DynqEnv::from_env`], which the binary calls before logging is set up.

use std::env;
use std::fmt;
use std::time::Duration;

/// Region used when none is given.
pub const DEFAULT_REGION: &str = "us-east-1";

/// How a found item is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One `field=value` line per attribute.
    #[default]
    Shell,
    /// The response as one line of JSON.
    Json,
}

impl RenderMode {
    /// Mode selected by the `--output-json` flag.
    #[must_use]
    pub fn from_output_json(output_json: bool) -> Self {
        if output_json { Self::Json } else { Self::Shell }
    }
}

/// What to read and how to print it.
///
/// Exactly one of `key_value` and `query` must be set; the pipeline checks
/// this before doing anything else.
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    /// Target table.
    pub table_name: String,
    /// Shorthand `field=value` key expression.
    pub key_value: Option<String>,
    /// Raw JSON key expression with typed values.
    pub query: Option<String>,
    /// Output format.
    pub render_mode: RenderMode,
}

/// Settings used only to construct the store client.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// AWS region.
    pub region: String,
    /// Static access key id.
    pub access_key_id: Option<String>,
    /// Static secret access key.
    pub secret_access_key: Option<String>,
    /// Session token for temporary static credentials.
    pub session_token: Option<String>,
    /// Override endpoint, e.g. a local DynamoDB.
    pub endpoint_url: Option<String>,
    /// Connect/read timeout for the instance metadata service.
    pub metadata_service_timeout: Duration,
    /// Attempts against the instance metadata service before giving up.
    pub metadata_service_num_attempts: u32,
}

impl ConnectionConfig {
    /// Both halves of a static key pair, if given.
    #[must_use]
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Whether only one half of the static key pair was given.
    #[must_use]
    pub fn has_partial_credentials(&self) -> bool {
        self.access_key_id.is_some() != self.secret_access_key.is_some()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_owned(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint_url: None,
            metadata_service_timeout: Duration::from_secs(3),
            metadata_service_num_attempts: 10,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("endpoint_url", &self.endpoint_url)
            .field("metadata_service_timeout", &self.metadata_service_timeout)
            .field(
                "metadata_service_num_attempts",
                &self.metadata_service_num_attempts,
            )
            .finish()
    }
}

/// Environment-driven settings that only affect logging.
#[derive(Debug, Clone, Default)]
pub struct DynqEnv {
    /// `RUST_LOG` is set and should be used as-is.
    pub rust_log: bool,
    /// `LOG_LEVEL` filter, if set.
    pub log_level: Option<String>,
    /// `DYNQ_DEBUG`: log requests made by dynq and the AWS SDK. Set but
    /// non-truthy values such as `0` or `no` leave it off.
    pub debug: bool,
}

impl DynqEnv {
    /// Read the logging variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            rust_log: env::var("RUST_LOG").is_ok(),
            log_level: env::var("LOG_LEVEL").ok(),
            debug: env_bool("DYNQ_DEBUG", false),
        }
    }

    /// Tracing filter directive for these settings.
    ///
    /// Precedence: `DYNQ_DEBUG`, then `LOG_LEVEL`, then `info` when verbose,
    /// otherwise `warn`. `RUST_LOG` is handled by the caller.
    #[must_use]
    pub fn log_filter(&self, verbose: bool) -> String {
        if self.debug {
            return "warn,dynq=debug,dynq_core=debug,dynq_client=debug,aws_sdk_dynamodb=debug,aws_smithy_runtime=debug,aws_config=debug".to_owned();
        }
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        if verbose { "info" } else { "warn" }.to_owned()
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| parse_bool(&v))
}

fn parse_bool(v: &str) -> bool {
    matches!(v, "1" | "true" | "yes" | "TRUE" | "YES")
}
