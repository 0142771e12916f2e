//
// provider.rs
// Update-Golden-AMI-rs
//
// The cloud collaborator seam: region discovery plus per-region image listing and tagging.
//
// Thales Matheus Mendonça Santos - October 2026

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Image, Region, Tag};

/// Capabilities the tagging workflow consumes from the cloud provider.
///
/// Production uses [`crate::ec2::Ec2Provider`]; tests inject an in-memory fake.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn list_enabled_regions(&self) -> Result<Vec<Region>>;

    /// Images owned by the calling account and launchable by everyone. Single page only.
    async fn list_owned_public_images(&self, region: &Region) -> Result<Vec<Image>>;

    async fn create_tag(&self, region: &Region, image_id: &str, tag: &Tag) -> Result<()>;
}
