//
// models.rs
// Update-Golden-AMI-rs
//
// Defines the records fetched from the provider and the serializable per-region and per-run results.
//
// Thales Matheus Mendonça Santos - October 2026

use serde::{Serialize, Serializer};

use crate::error::TaggerError;

/// An enabled region as returned by the region-listing call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Region {
    pub name: String,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A key/value metadata pair attached to an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Read-only snapshot of a machine image for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub image_id: String,
    pub name: Option<String>,
    pub architecture: Option<String>,
    pub owner_id: Option<String>,
    pub tags: Vec<Tag>,
}

impl Image {
    /// Image with only an id and tags, the two fields the tagging workflow reads.
    pub fn new(image_id: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            image_id: image_id.into(),
            name: None,
            architecture: None,
            owner_id: None,
            tags,
        }
    }

    pub fn has_tag_key(&self, key: &str) -> bool {
        self.tags.iter().any(|t| t.key == key)
    }
}

/// Outcome of one region's list -> filter -> act pipeline.
///
/// `images` holds the ids acted upon (or that would be, in dry-run). On a
/// tagging failure it keeps the images tagged before the failing call.
#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: String,
    pub dry_run: bool,
    pub images: Vec<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<TaggerError>,
}

fn serialize_error<S: Serializer>(error: &Option<TaggerError>, s: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}

impl RegionReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Consolidated result of a whole run, sorted by region name.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub tag: Tag,
    pub regions: Vec<RegionReport>,
}

impl RunSummary {
    pub fn failed_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|r| !r.succeeded())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_regions().next().is_some()
    }

    pub fn affected_images(&self) -> usize {
        self.regions.iter().map(|r| r.images.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(region: &str, images: &[&str], error: Option<&str>) -> RegionReport {
        RegionReport {
            region: region.to_string(),
            dry_run: false,
            images: images.iter().map(|s| s.to_string()).collect(),
            error: error.map(|m| TaggerError::Tagging {
                region: region.to_string(),
                image_id: "ami-x".to_string(),
                message: m.to_string(),
            }),
        }
    }

    #[test]
    fn summary_counts_images_across_failed_and_successful_regions() {
        let summary = RunSummary {
            dry_run: false,
            tag: Tag::new("version", "legacy-x86_64"),
            regions: vec![
                report("eu-west-1", &["ami-1", "ami-2"], None),
                report("us-east-1", &["ami-3"], Some("boom")),
            ],
        };

        assert_eq!(summary.affected_images(), 3);
        assert!(summary.has_failures());
        let failed: Vec<_> = summary.failed_regions().map(|r| r.region.as_str()).collect();
        assert_eq!(failed, vec!["us-east-1"]);
    }

    #[test]
    fn summary_serializes_null_error_for_clean_regions() {
        let summary = RunSummary {
            dry_run: true,
            tag: Tag::new("version", "legacy-x86_64"),
            regions: vec![report("us-east-1", &["ami-1"], None)],
        };
        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(value["regions"][0]["error"], serde_json::Value::Null);
        assert_eq!(value["tag"]["key"], "version");
    }
}
