use crate::core::{QueryParameters, DEFAULT_PAGE_SIZE_LIMIT, DEFAULT_PARTITION_KEY_VALUE};
use crate::error::Error;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub table_name: String,
    pub region: String,
    pub partition_key_value: String,
    pub page_size_limit: i32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            table_name: "cities".to_string(),
            region: "eu-central-1".to_string(),
            partition_key_value: DEFAULT_PARTITION_KEY_VALUE.to_string(),
            page_size_limit: DEFAULT_PAGE_SIZE_LIMIT,
        }
    }
}

impl Configuration {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Configuration::default()))
            // .merge overrides the defaults with anything set in the environment
            .merge(Env::prefixed("APP_"))
    }

    pub fn query_parameters(&self) -> Result<QueryParameters, Error> {
        QueryParameters::new(&self.partition_key_value, self.page_size_limit)
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration {{ table_name: {}, region: {}, partition_key_value: {}, page_size_limit: {} }}",
            self.table_name, self.region, self.partition_key_value, self.page_size_limit
        )
    }
}
