use crate::error::Error;
use crate::pagination::list_all;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

pub const DEFAULT_PARTITION_KEY_VALUE: &str = "city";
pub const DEFAULT_PAGE_SIZE_LIMIT: i32 = 2;

/// A raw record as the store returns it.
pub type Item = HashMap<String, AttributeValue>;

/// Position of a paginated scan. Only ever handed back to the source that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor(HashMap<String, AttributeValue>);

impl Cursor {
    pub(crate) fn from_key(key: HashMap<String, AttributeValue>) -> Self {
        Self(key)
    }

    pub(crate) fn into_key(self) -> HashMap<String, AttributeValue> {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Page {
    pub items: Vec<Item>,
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn new(items: Vec<Item>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    partition_key_value: String,
    page_size_limit: i32,
}

impl QueryParameters {
    pub fn new(partition_key_value: &str, page_size_limit: i32) -> Result<Self, Error> {
        if partition_key_value.is_empty() {
            return Err(Error::InvalidQueryParameters(
                "partition key value must not be empty".to_string(),
            ));
        }
        if page_size_limit <= 0 {
            return Err(Error::InvalidQueryParameters(format!(
                "page size limit must be positive, got {}",
                page_size_limit
            )));
        }

        Ok(Self {
            partition_key_value: partition_key_value.to_string(),
            page_size_limit,
        })
    }

    pub fn partition_key_value(&self) -> &str {
        &self.partition_key_value
    }

    pub fn page_size_limit(&self) -> i32 {
        self.page_size_limit
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            partition_key_value: DEFAULT_PARTITION_KEY_VALUE.to_string(),
            page_size_limit: DEFAULT_PAGE_SIZE_LIMIT,
        }
    }
}

/// Issues one bounded query per call against the backing store.
#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait QueryPageSource: Debug + Send + Sync {
    async fn fetch_page(
        &self,
        partition_key_value: &str,
        page_size_limit: i32,
        cursor: Option<Cursor>,
    ) -> Result<Page, Error>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait CityRepository: Debug {
    async fn list_cities(&self) -> Result<Vec<City>, Error>;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct City {
    pub name: String,
    pub population: i64,
}

impl City {
    pub fn new(name: String, population: i64) -> Self {
        Self { name, population }
    }
}

impl TryFrom<Item> for City {
    type Error = Error;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        let name = item
            .get("sk")
            .ok_or_else(|| Error::MalformedItem("sk not found".to_string()))?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| Error::MalformedItem("sk is not a String".to_string()))?;
        let population = item
            .get("population")
            .ok_or_else(|| Error::MalformedItem(format!("population not found for {}", name)))?
            .as_n()
            .map_err(|_| Error::MalformedItem("population is not a number".to_string()))
            .and_then(|n| {
                n.parse::<i64>().map_err(|_| {
                    Error::MalformedItem(format!("Cannot convert population {} into i64", n))
                })
            })?;

        Ok(City::new(name, population))
    }
}

/// Lists every city stored under one partition key.
#[derive(Debug)]
pub struct CityRepo<S: QueryPageSource> {
    source: S,
    query: QueryParameters,
}

impl<S: QueryPageSource> CityRepo<S> {
    pub fn new(source: S, query: QueryParameters) -> Self {
        Self { source, query }
    }
}

#[async_trait]
impl<S: QueryPageSource> CityRepository for CityRepo<S> {
    async fn list_cities(&self) -> Result<Vec<City>, Error> {
        let items = list_all(&self.source, &self.query).await?;
        tracing::info!(count = items.len(), "Listed items");

        items.into_iter().map(City::try_from).collect()
    }
}
