use aws_config::{BehaviorVersion, Region};
use city_repo::adapters::DynamoDbQuerySource;
use city_repo::configuration::Configuration;
use city_repo::core::{CityRepo, CityRepository, Item, QueryPageSource};
use city_repo::pagination::pages;
use futures::TryStreamExt;

fn sort_key(item: &Item) -> Option<String> {
    item.get("sk").and_then(|sk| sk.as_s().ok()).cloned()
}

async fn build_source(configuration: &Configuration) -> DynamoDbQuerySource {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(configuration.region.clone()))
        .load()
        .await;
    DynamoDbQuerySource::new(
        configuration.table_name.clone(),
        aws_sdk_dynamodb::Client::new(&config),
    )
}

#[ignore]
#[tokio::test]
async fn when_partition_listed_should_match_page_concatenation() {
    let configuration = Configuration::load().unwrap();
    let query = configuration.query_parameters().unwrap();
    let source = build_source(&configuration).await;

    let pages: Vec<_> = pages(&source, &query).try_collect().await.unwrap();
    let page_items: usize = pages.iter().map(|page| page.len()).sum();

    assert!(pages
        .iter()
        .all(|page| page.len() <= query.page_size_limit() as usize));

    let repo = CityRepo::new(source, query);
    let cities = repo.list_cities().await.unwrap();

    assert_eq!(cities.len(), page_items);
}

#[ignore]
#[tokio::test]
async fn when_cursor_returned_should_resume_after_last_item() {
    let configuration = Configuration::load().unwrap();
    let source = build_source(&configuration).await;

    let first = source
        .fetch_page(&configuration.partition_key_value, 1, None)
        .await
        .unwrap();

    if let Some(cursor) = first.next_cursor {
        let second = source
            .fetch_page(&configuration.partition_key_value, 1, Some(cursor))
            .await
            .unwrap();
        let last_seen = first.items.last().and_then(|item| sort_key(item));
        let resumed_at = second.items.first().and_then(|item| sort_key(item));
        if let (Some(last_seen), Some(resumed_at)) = (last_seen, resumed_at) {
            assert!(resumed_at > last_seen, "{} should sort after {}", resumed_at, last_seen);
        }
    }
}

#[ignore]
#[tokio::test]
async fn when_table_missing_should_return_query_error() {
    let mut configuration = Configuration::load().unwrap();
    configuration.table_name = "no-such-table-for-city-repo".to_string();
    let source = build_source(&configuration).await;

    let result = source
        .fetch_page(&configuration.partition_key_value, 2, None)
        .await;

    assert!(matches!(result, Err(city_repo::Error::Query(_))));
}
