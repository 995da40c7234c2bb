use std::io::Write;

use aws_config::{BehaviorVersion, Region};
use city_repo::adapters::DynamoDbQuerySource;
use city_repo::configuration::Configuration;
use city_repo::core::{CityRepo, CityRepository};
use city_repo::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let configuration = Configuration::load()?;
    tracing::info!("{}", configuration);
    let query = configuration.query_parameters()?;

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(configuration.region.clone()))
        .load()
        .await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);

    let source = DynamoDbQuerySource::new(configuration.table_name, dynamodb_client);
    let repo = CityRepo::new(source, query);

    print_cities(&repo, &mut std::io::stdout().lock()).await
}

async fn print_cities<R: CityRepository>(repo: &R, out: &mut impl Write) -> anyhow::Result<()> {
    let cities = repo.list_cities().await?;
    serde_json::to_writer_pretty(&mut *out, &cities)?;
    writeln!(out)?;
    Ok(())
}
