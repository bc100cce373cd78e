//! Command-line argument definitions.

use std::time::Duration;

use clap::Parser;
use dynq_core::config::DEFAULT_REGION;
use dynq_core::{ConnectionConfig, QueryConfig, RenderMode};

const EXAMPLES: &str = "\
Examples:
  dynq --table-name deployment --key-value environment=gozer-dev
  dynq --output-json --table-name deployment --key-value environment=gozer-prod
  dynq --output-json --table-name deployment --query '{\"environment\":{\"S\":\"gozer-potato\"}}'";

/// dynq - a simple DynamoDB client that just works.
///
/// Fetches one item by primary key and prints its fields.
#[derive(Parser, Debug)]
#[command(name = "dynq", version, after_help = EXAMPLES)]
pub struct Args {
    /// AWS access key id
    #[arg(long, value_name = "AWS_ACCESS_KEY_ID", env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub aws_access_key_id: Option<String>,

    /// AWS secret access key
    #[arg(
        long,
        value_name = "AWS_SECRET_ACCESS_KEY",
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true
    )]
    pub aws_secret_access_key: Option<String>,

    /// AWS session token for temporary credentials
    #[arg(long, value_name = "AWS_SESSION_TOKEN", env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub aws_session_token: Option<String>,

    /// AWS region
    #[arg(long, value_name = "REGION", env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom endpoint, e.g. a local DynamoDB
    #[arg(long, value_name = "URL", env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Output the returned item as JSON
    #[arg(long)]
    pub output_json: bool,

    /// The target table to query
    #[arg(long, value_name = "TABLE_NAME")]
    pub table_name: String,

    /// The key to look up as raw typed JSON, e.g. {"environment":{"S":"gozer-dev"}}
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// The key to look up as field=value, converted to {"field":{"S":"value"}}
    #[arg(long, value_name = "KEY_VALUE")]
    pub key_value: Option<String>,

    /// Seconds until a request to the instance metadata service times out
    #[arg(
        long,
        value_name = "SECONDS",
        env = "AWS_METADATA_SERVICE_TIMEOUT",
        default_value_t = 3
    )]
    pub metadata_service_timeout: u64,

    /// Attempts against the instance metadata service before giving up
    #[arg(
        long,
        value_name = "ATTEMPTS",
        env = "AWS_METADATA_SERVICE_NUM_ATTEMPTS",
        default_value_t = 10
    )]
    pub metadata_service_num_attempts: u32,

    /// Print the version banner and informational logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// What to read and how to print it.
    #[must_use]
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            table_name: self.table_name.clone(),
            key_value: self.key_value.clone(),
            query: self.query.clone(),
            render_mode: RenderMode::from_output_json(self.output_json),
        }
    }

    /// How to reach the store.
    #[must_use]
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            region: self.region.clone(),
            access_key_id: self.aws_access_key_id.clone(),
            secret_access_key: self.aws_secret_access_key.clone(),
            session_token: self.aws_session_token.clone(),
            endpoint_url: self.endpoint_url.clone(),
            metadata_service_timeout: Duration::from_secs(self.metadata_service_timeout),
            metadata_service_num_attempts: self.metadata_service_num_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_should_parse_key_value_invocation() {
        let args = Args::try_parse_from([
            "dynq",
            "--table-name",
            "deployment",
            "--key-value",
            "environment=gozer-dev",
        ])
        .unwrap();

        let query = args.query_config();
        assert_eq!(query.table_name, "deployment");
        assert_eq!(query.key_value.as_deref(), Some("environment=gozer-dev"));
        assert!(query.query.is_none());
        assert_eq!(query.render_mode, RenderMode::Shell);
    }

    #[test]
    fn test_should_parse_json_invocation() {
        let args = Args::try_parse_from([
            "dynq",
            "--output-json",
            "--table-name",
            "deployment",
            "--query",
            r#"{"environment":{"S":"gozer-potato"}}"#,
            "--region",
            "eu-west-1",
            "--metadata-service-timeout",
            "5",
            "--metadata-service-num-attempts",
            "2",
        ])
        .unwrap();

        assert_eq!(args.query_config().render_mode, RenderMode::Json);
        let connection = args.connection_config();
        assert_eq!(connection.region, "eu-west-1");
        assert_eq!(connection.metadata_service_timeout, Duration::from_secs(5));
        assert_eq!(connection.metadata_service_num_attempts, 2);
    }

    #[test]
    fn test_should_leave_key_validation_to_the_pipeline() {
        // Neither and both are accepted here and rejected by the pipeline.
        assert!(Args::try_parse_from(["dynq", "--table-name", "t"]).is_ok());
        assert!(
            Args::try_parse_from([
                "dynq",
                "--table-name",
                "t",
                "--key-value",
                "k=v",
                "--query",
                "{}",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_should_require_table_name_with_usage_exit_code() {
        let err = Args::try_parse_from(["dynq", "--key-value", "k=v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_should_verify_arg_definitions() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
