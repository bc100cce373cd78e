//! [`ItemClient`] over `aws_sdk_dynamodb::Client`.

use aws_config::BehaviorVersion;
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::imds;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use dynq_core::{ClientError, ConnectionConfig, ItemClient};
use dynq_model::{KeyDescriptor, LookupResult};
use tracing::{debug, info, warn};

use crate::convert::{item_from_sdk, key_to_sdk};

/// Provider name recorded on credentials passed as flags.
const STATIC_PROVIDER_NAME: &str = "dynq-cli";

/// DynamoDB point reads through the AWS SDK.
#[derive(Debug, Clone)]
pub struct DynamoDbItemClient {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbItemClient {
    /// Wrap an existing SDK client.
    #[must_use]
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    /// Build a client from connection settings.
    ///
    /// No request is made here; credentials are resolved lazily on the
    /// first call.
    pub async fn connect(config: &ConnectionConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self::new(aws_sdk_dynamodb::Client::new(&sdk_config))
    }
}

/// Assemble the shared SDK configuration.
///
/// Static credentials win when both key halves are present; otherwise the
/// default provider chain is used with an instance metadata client tuned by
/// the timeout and attempt settings.
pub async fn load_sdk_config(config: &ConnectionConfig) -> aws_config::SdkConfig {
    let region = Region::new(config.region.clone());
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region.clone());

    if let Some(endpoint_url) = &config.endpoint_url {
        info!(endpoint_url = %endpoint_url, "using custom endpoint");
        loader = loader.endpoint_url(endpoint_url);
    }

    if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
        info!(access_key_id = %access_key_id, "using static credentials from flags");
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            config.session_token.clone(),
            None,
            STATIC_PROVIDER_NAME,
        ));
    } else {
        if config.has_partial_credentials() {
            warn!("only one of access key id and secret access key given, ignoring both");
        }
        let imds_client = imds::Client::builder()
            .connect_timeout(config.metadata_service_timeout)
            .read_timeout(config.metadata_service_timeout)
            .max_attempts(config.metadata_service_num_attempts)
            .build();
        let chain = DefaultCredentialsChain::builder()
            .region(region)
            .imds_client(imds_client)
            .build()
            .await;
        loader = loader.credentials_provider(chain);
    }

    loader.load().await
}

#[async_trait::async_trait]
impl ItemClient for DynamoDbItemClient {
    async fn get_item(
        &self,
        table_name: &str,
        key: &KeyDescriptor,
    ) -> Result<LookupResult, ClientError> {
        let output = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key_to_sdk(key)))
            .send()
            .await
            .map_err(sdk_error)?;

        match output.item {
            Some(raw) => {
                debug!(table = table_name, fields = raw.len(), "item found");
                Ok(LookupResult::Found(item_from_sdk(raw)?))
            }
            None => {
                debug!(table = table_name, "item not found");
                Ok(LookupResult::NotFound)
            }
        }
    }
}

/// Collapse an SDK failure into the opaque client error.
fn sdk_error(e: SdkError<GetItemError>) -> ClientError {
    let message = match (e.code(), e.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_owned(),
        _ => DisplayErrorContext(&e).to_string(),
    };
    ClientError::new(message).with_source(e)
}

#[cfg(test)]
mod tests {
    use aws_credential_types::provider::ProvideCredentials;

    use super::*;

    #[tokio::test]
    async fn test_should_build_sdk_config_with_static_credentials() {
        let config = ConnectionConfig {
            region: "eu-west-1".to_owned(),
            access_key_id: Some("AKIDEXAMPLE".to_owned()),
            secret_access_key: Some("secret".to_owned()),
            endpoint_url: Some("http://localhost:8000".to_owned()),
            ..ConnectionConfig::default()
        };

        let sdk_config = load_sdk_config(&config).await;
        assert_eq!(sdk_config.region().unwrap().as_ref(), "eu-west-1");
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:8000"));

        let creds = sdk_config
            .credentials_provider()
            .unwrap()
            .provide_credentials()
            .await
            .unwrap();
        assert_eq!(creds.access_key_id(), "AKIDEXAMPLE");
        assert_eq!(creds.secret_access_key(), "secret");
    }

    #[tokio::test]
    async fn test_should_build_sdk_config_with_default_chain() {
        let config = ConnectionConfig::default();
        let sdk_config = load_sdk_config(&config).await;
        assert_eq!(sdk_config.region().unwrap().as_ref(), "us-east-1");
        assert!(sdk_config.credentials_provider().is_some());
        assert!(sdk_config.endpoint_url().is_none());
    }
}
