use std::sync::Arc;
use std::{env, fs};

use actix_cors::Cors;
use actix_web::http;
use anyhow::Context;
use aws_config::SdkConfig;
use log::warn;
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, DEFAULT_USERNAME_INDEX};
use crate::resources::blob_store::{BlobStore, S3BlobStore};
use crate::resources::memory::{MemoryBlobStore, MemoryRecordStore};
use crate::resources::record_store::{DynamoRecordStore, RecordStore};
use crate::resources::resource::Resource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Aws,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsCfg {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub table: String,
    #[serde(default = "default_username_index")]
    pub username_index: String,
}

impl Default for AwsCfg {
    fn default() -> Self {
        Self {
            region: String::new(),
            bucket: String::new(),
            table: String::new(),
            username_index: default_username_index(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub allowed_origin: Option<String>,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub aws: AwsCfg,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origin: None,
            backend: Backend::default(),
            max_body_bytes: default_max_body_bytes(),
            aws: AwsCfg::default(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_username_index() -> String {
    DEFAULT_USERNAME_INDEX.to_string()
}

impl Config {
    /// Reads `config.<ENV>.toml` when present, then applies the `TABLENAME`,
    /// `BUCKETNAME` and `REGION` environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let env = env::var("ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config.{}.toml", env);

        let mut config = match fs::read_to_string(&config_file) {
            Ok(contents) => Self::parse(&contents).with_context(|| format!("Unable to parse {}", config_file))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, using defaults", config_file);
                Self::default()
            }
            Err(e) => return Err(e).with_context(|| format!("Unable to read {}", config_file)),
        };

        config.apply_overrides(|key| env::var(key).ok());

        Ok(config)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(table) = var("TABLENAME") {
            self.aws.table = table;
        }

        if let Some(bucket) = var("BUCKETNAME") {
            self.aws.bucket = bucket;
        }

        if let Some(region) = var("REGION") {
            self.aws.region = region;
        }
    }
}

#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub record_store: Arc<dyn RecordStore>,
    pub blob_store: Arc<dyn BlobStore>,
}

impl App {
    pub async fn new() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Config::load()?;

        Ok(Self::from_config(config).await)
    }

    pub async fn from_config(config: Config) -> Self {
        match config.backend {
            Backend::Aws => {
                // missing values are not fatal, the store calls will fail instead
                for (name, value) in [
                    ("region", &config.aws.region),
                    ("bucket", &config.aws.bucket),
                    ("table", &config.aws.table),
                ] {
                    if value.is_empty() {
                        warn!("aws.{} is not configured", name);
                    }
                }

                let sdk_config = SdkConfig::init_resource(&config.aws).await;
                let s3_client = aws_sdk_s3::Client::init_resource(&sdk_config).await;
                let dynamo_client = aws_sdk_dynamodb::Client::init_resource(&sdk_config).await;

                let blob_store = S3BlobStore::new(s3_client, config.aws.bucket.clone(), config.aws.region.clone());
                let record_store = DynamoRecordStore::new(
                    dynamo_client,
                    config.aws.table.clone(),
                    config.aws.username_index.clone(),
                );

                Self::with_stores(config, Arc::new(record_store), Arc::new(blob_store))
            }
            Backend::Memory => {
                let blob_store = MemoryBlobStore::new(config.aws.bucket.clone());

                Self::with_stores(config, Arc::new(MemoryRecordStore::new()), Arc::new(blob_store))
            }
        }
    }

    pub fn with_stores(config: Config, record_store: Arc<dyn RecordStore>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            config,
            record_store,
            blob_store,
        }
    }

    pub fn cors(&self) -> Cors {
        match &self.config.allowed_origin {
            Some(allowed_origin) => Cors::default()
                .allowed_origin(allowed_origin)
                .allowed_methods(vec!["GET", "PUT", "OPTIONS"])
                .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
                .max_age(86400),
            None => Cors::default(),
        }
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_full_config() {
        let config = Config::parse(
            r#"
            port = 8080
            allowed_origin = "http://localhost:3001"
            backend = "memory"

            [aws]
            region = "us-east-1"
            bucket = "avatars"
            table = "users"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.aws.bucket, "avatars");
        assert_eq!(config.aws.username_index, "username-index");
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").expect("valid config");

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.backend, Backend::Aws);
        assert!(config.aws.table.is_empty());
    }

    #[test]
    fn environment_overrides_aws_keys() {
        let mut config = Config::parse("[aws]\nregion = \"eu-west-1\"\ntable = \"users\"").expect("valid config");
        let vars = HashMap::from([("TABLENAME", "people"), ("BUCKETNAME", "pictures")]);

        config.apply_overrides(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.aws.table, "people");
        assert_eq!(config.aws.bucket, "pictures");
        assert_eq!(config.aws.region, "eu-west-1");
    }
}
