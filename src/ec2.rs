//
// ec2.rs
// Update-Golden-AMI-rs
//
// Production ImageProvider backed by the AWS SDK: one shared SdkConfig, region-scoped EC2 clients per call.
//
// Thales Matheus Mendonça Santos - October 2026

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, SdkConfig};
use aws_sdk_ec2::{config::Region as SdkRegion, types, Client};
use tracing::debug;

use crate::models::{Image, Region, Tag};
use crate::provider::ImageProvider;

const FALLBACK_REGION: &str = "us-east-1";

pub struct Ec2Provider {
    sdk_config: SdkConfig,
    home: Client,
}

impl Ec2Provider {
    /// Resolves credentials and the home region from the default provider chains.
    pub async fn load() -> Self {
        let region_provider = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;
        Self::from_sdk_config(sdk_config)
    }

    pub fn from_sdk_config(sdk_config: SdkConfig) -> Self {
        let home = Client::new(&sdk_config);
        Self { sdk_config, home }
    }

    fn client_for(&self, region: &Region) -> Client {
        // Reuse the resolved credentials and HTTP client, only the endpoint region changes.
        let conf = aws_sdk_ec2::config::Builder::from(&self.sdk_config)
            .region(SdkRegion::new(region.name.clone()))
            .build();
        Client::from_conf(conf)
    }
}

#[async_trait]
impl ImageProvider for Ec2Provider {
    async fn list_enabled_regions(&self) -> Result<Vec<Region>> {
        // DescribeRegions without AllRegions only returns regions enabled for the account.
        let resp = self
            .home
            .describe_regions()
            .send()
            .await
            .context("DescribeRegions failed")?;

        Ok(resp
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(Region::new)
            .collect())
    }

    async fn list_owned_public_images(&self, region: &Region) -> Result<Vec<Image>> {
        let resp = self
            .client_for(region)
            .describe_images()
            .owners("self")
            .executable_users("all")
            .send()
            .await
            .context("DescribeImages failed")?;

        let images: Vec<Image> = resp.images().iter().filter_map(convert_image).collect();
        debug!(region = %region.name, count = images.len(), "described images");
        Ok(images)
    }

    async fn create_tag(&self, region: &Region, image_id: &str, tag: &Tag) -> Result<()> {
        self.client_for(region)
            .create_tags()
            .resources(image_id)
            .tags(
                types::Tag::builder()
                    .key(tag.key.as_str())
                    .value(tag.value.as_str())
                    .build(),
            )
            .send()
            .await
            .context("CreateTags failed")?;
        Ok(())
    }
}

fn convert_image(image: &types::Image) -> Option<Image> {
    // An image without an id cannot be tagged, so it is dropped here.
    // Tags missing a key are skipped; a missing value reads as empty.
    let image_id = image.image_id()?.to_string();
    let tags = image
        .tags()
        .iter()
        .filter_map(|t| Some(Tag::new(t.key()?, t.value().unwrap_or_default())))
        .collect();

    Some(Image {
        image_id,
        name: image.name().map(str::to_string),
        architecture: image.architecture().map(|a| a.as_str().to_string()),
        owner_id: image.owner_id().map(str::to_string),
        tags,
    })
}
