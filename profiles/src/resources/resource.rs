use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::app::AwsCfg;

/// Resource's should be alive during application runtime.
/// They wrap clients of external services and are built once at start-up.
#[allow(async_fn_in_trait)]
pub trait Resource<'a> {
    type Cfg;

    async fn init_resource(config: Self::Cfg) -> Self;
}

impl<'a> Resource<'a> for SdkConfig {
    type Cfg = &'a AwsCfg;

    async fn init_resource(config: Self::Cfg) -> Self {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await
    }
}

impl<'a> Resource<'a> for aws_sdk_s3::Client {
    type Cfg = &'a SdkConfig;

    async fn init_resource(config: Self::Cfg) -> Self {
        aws_sdk_s3::Client::new(config)
    }
}

impl<'a> Resource<'a> for aws_sdk_dynamodb::Client {
    type Cfg = &'a SdkConfig;

    async fn init_resource(config: Self::Cfg) -> Self {
        aws_sdk_dynamodb::Client::new(config)
    }
}
