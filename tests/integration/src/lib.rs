//! Integration tests for dynq against a live DynamoDB-compatible endpoint.
//!
//! These tests require a server at `localhost:4566` (or `DYNQ_ENDPOINT_URL`).
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p dynq-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use dynq_client::DynamoDbItemClient;
use dynq_core::ConnectionConfig;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("DYNQ_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Connection settings dynq would build from its flags.
#[must_use]
pub fn connection_config() -> ConnectionConfig {
    ConnectionConfig {
        access_key_id: Some("test".to_owned()),
        secret_access_key: Some("test".to_owned()),
        endpoint_url: Some(endpoint_url()),
        ..ConnectionConfig::default()
    }
}

/// Create the dynq client under test.
pub async fn dynq_client() -> DynamoDbItemClient {
    init_tracing();
    DynamoDbItemClient::connect(&connection_config()).await
}

/// Create a raw SDK client for seeding and cleanup.
#[must_use]
pub fn sdk_client() -> aws_sdk_dynamodb::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_dynamodb::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_dynamodb::Client::from_conf(config)
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a table keyed on a string `environment` attribute.
pub async fn create_deployment_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
    client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("environment")
                .key_type(KeyType::Hash)
                .build()
                .unwrap(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("environment")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create table {table_name}: {e}"));
}

/// Put one deployment item.
pub async fn put_deployment(
    client: &aws_sdk_dynamodb::Client,
    table_name: &str,
    environment: &str,
    version: &str,
) {
    client
        .put_item()
        .table_name(table_name)
        .item("environment", AttributeValue::S(environment.to_owned()))
        .item("version", AttributeValue::N(version.to_owned()))
        .item("active", AttributeValue::Bool(true))
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to put item into {table_name}: {e}"));
}

/// Delete a table, ignoring errors.
pub async fn cleanup_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;
}

mod test_get_item;
