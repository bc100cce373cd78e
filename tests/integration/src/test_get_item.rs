//! Point reads through `DynamoDbItemClient` and the full pipeline.

#[cfg(test)]
mod tests {
    use dynq_core::{ExitStatus, ItemClient, QueryConfig, QueryPipeline, RenderMode};
    use dynq_model::{AttributeValue, KeyDescriptor, LookupResult};

    use crate::{
        cleanup_table, create_deployment_table, dynq_client, put_deployment, sdk_client,
        test_table_name,
    };

    fn query(table_name: &str, key_value: &str, render_mode: RenderMode) -> QueryConfig {
        QueryConfig {
            table_name: table_name.to_owned(),
            key_value: Some(key_value.to_owned()),
            query: None,
            render_mode,
        }
    }

    async fn run(
        client: &dynq_client::DynamoDbItemClient,
        config: &QueryConfig,
    ) -> (ExitStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = QueryPipeline::new(client).run(config, &mut out, &mut err).await;
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_get_existing_item() {
        let sdk = sdk_client();
        let table_name = test_table_name("found");
        create_deployment_table(&sdk, &table_name).await;
        put_deployment(&sdk, &table_name, "gozer-dev", "12").await;

        let client = dynq_client().await;
        let key = KeyDescriptor::string("environment", "gozer-dev").unwrap();
        let result = client.get_item(&table_name, &key).await.unwrap();

        let LookupResult::Found(item) = result else {
            panic!("expected item, got {result:?}");
        };
        assert_eq!(item.get("version"), Some(&AttributeValue::N("12".to_owned())));
        assert_eq!(item.get("active"), Some(&AttributeValue::Bool(true)));

        cleanup_table(&sdk, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_print_item_as_sorted_shell_lines() {
        let sdk = sdk_client();
        let table_name = test_table_name("shell");
        create_deployment_table(&sdk, &table_name).await;
        put_deployment(&sdk, &table_name, "gozer-dev", "12").await;

        let client = dynq_client().await;
        let (status, out, err) = run(
            &client,
            &query(&table_name, "environment=gozer-dev", RenderMode::Shell),
        )
        .await;

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(out, "active=true\nenvironment=gozer-dev\nversion=12\n");
        assert!(err.is_empty());

        cleanup_table(&sdk, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_print_item_as_json() {
        let sdk = sdk_client();
        let table_name = test_table_name("json");
        create_deployment_table(&sdk, &table_name).await;
        put_deployment(&sdk, &table_name, "gozer-prod", "3").await;

        let client = dynq_client().await;
        let (status, out, _) = run(
            &client,
            &query(&table_name, "environment=gozer-prod", RenderMode::Json),
        )
        .await;

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(
            out,
            "{\"Item\":{\"active\":{\"BOOL\":true},\"environment\":{\"S\":\"gozer-prod\"},\"version\":{\"N\":\"3\"}}}\n"
        );

        cleanup_table(&sdk, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_item() {
        let sdk = sdk_client();
        let table_name = test_table_name("missing");
        create_deployment_table(&sdk, &table_name).await;

        let client = dynq_client().await;
        let (status, out, err) = run(
            &client,
            &query(&table_name, "environment=gozer-potato", RenderMode::Shell),
        )
        .await;

        assert_eq!(status, ExitStatus::Failure);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "No such item found for: {\"environment\":{\"S\":\"gozer-potato\"}}\n"
        );

        cleanup_table(&sdk, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_on_missing_table() {
        let client = dynq_client().await;
        let table_name = test_table_name("nosuchtable");
        let (status, out, err) = run(
            &client,
            &query(&table_name, "environment=gozer-dev", RenderMode::Shell),
        )
        .await;

        assert_eq!(status, ExitStatus::Failure);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: "));
        assert!(err.contains("ResourceNotFoundException"));
    }
}
