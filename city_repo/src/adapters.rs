use crate::core::{Cursor, Page, QueryPageSource};
use crate::error::Error;
use async_trait::async_trait;
use aws_sdk_dynamodb::{operation::query::builders::QueryFluentBuilder, types::AttributeValue, Client};

const PARTITION_KEY_ATTRIBUTE: &str = "pk";

#[derive(Debug)]
pub struct DynamoDbQuerySource {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbQuerySource {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }

    fn build_query(
        &self,
        partition_key_value: &str,
        page_size_limit: i32,
        cursor: Option<Cursor>,
    ) -> QueryFluentBuilder {
        self.dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", PARTITION_KEY_ATTRIBUTE)
            .expression_attribute_values(":pk", AttributeValue::S(partition_key_value.to_string()))
            .limit(page_size_limit)
            .set_exclusive_start_key(cursor.map(Cursor::into_key))
    }
}

#[async_trait]
impl QueryPageSource for DynamoDbQuerySource {
    async fn fetch_page(
        &self,
        partition_key_value: &str,
        page_size_limit: i32,
        cursor: Option<Cursor>,
    ) -> Result<Page, Error> {
        tracing::info!(
            table_name = %self.table_name,
            partition_key_value,
            page_size_limit,
            resuming = cursor.is_some(),
            "executing a query"
        );

        let result = self
            .build_query(partition_key_value, page_size_limit, cursor)
            .send()
            .await
            .map_err(|e| {
                let err = Error::from(e);
                tracing::error!("Failed to query {}: {}", self.table_name, err);
                err
            })?;

        let next_cursor = result
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(Cursor::from_key);

        Ok(Page::new(result.items.unwrap_or_default(), next_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tests::cursor_after;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    fn source() -> DynamoDbQuerySource {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-central-1"))
            .build();
        DynamoDbQuerySource::new("cities".to_string(), Client::from_conf(config))
    }

    #[test]
    fn when_first_page_should_query_partition_without_start_key() {
        let source = source();

        let query = source.build_query("city", 2, None);

        assert_eq!(query.get_table_name().as_deref(), Some("cities"));
        assert_eq!(query.get_key_condition_expression().as_deref(), Some("#pk = :pk"));
        assert_eq!(
            query
                .get_expression_attribute_names()
                .as_ref()
                .and_then(|names| names.get("#pk"))
                .map(|s| s.as_str()),
            Some("pk")
        );
        assert_eq!(
            query
                .get_expression_attribute_values()
                .as_ref()
                .and_then(|values| values.get(":pk")),
            Some(&AttributeValue::S("city".to_string()))
        );
        assert_eq!(*query.get_limit(), Some(2));
        assert!(query.get_exclusive_start_key().is_none());
    }

    #[test]
    fn when_cursor_given_should_pass_it_through_verbatim() {
        let source = source();

        let query = source.build_query("city", 2, Some(cursor_after("Munich")));

        assert_eq!(
            query.get_exclusive_start_key().clone().map(Cursor::from_key),
            Some(cursor_after("Munich"))
        );
    }
}
