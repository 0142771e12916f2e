//
// config.rs
// Update-Golden-AMI-rs
//
// Immutable run configuration shared read-only by the coordinator and every region worker.
//
// Thales Matheus Mendonça Santos - October 2026

use std::num::NonZeroUsize;

use crate::error::TaggerError;
use crate::models::Tag;

pub const DEFAULT_TAG_KEY: &str = "version";
pub const DEFAULT_TAG_VALUE: &str = "legacy-x86_64";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Tag applied to images whose tag set has no entry with this key.
    pub tag: Tag,
    pub dry_run: bool,
    /// `None` dispatches every region at once.
    pub max_concurrency: Option<NonZeroUsize>,
    /// Restricts the run to these regions when non-empty.
    pub regions: Vec<String>,
}

impl RunConfig {
    pub fn new(tag_key: &str, tag_value: &str, dry_run: bool) -> Result<Self, TaggerError> {
        let key = tag_key.trim();
        if key.is_empty() {
            return Err(TaggerError::InvalidConfig(
                "tag key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            tag: Tag::new(key, tag_value),
            dry_run,
            max_concurrency: None,
            regions: Vec::new(),
        })
    }

    pub fn with_max_concurrency(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = regions;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tag: Tag::new(DEFAULT_TAG_KEY, DEFAULT_TAG_VALUE),
            dry_run: false,
            max_concurrency: None,
            regions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_legacy_version_tag() {
        let config = RunConfig::default();
        assert_eq!(config.tag, Tag::new("version", "legacy-x86_64"));
        assert!(!config.dry_run);
        assert!(config.max_concurrency.is_none());
    }

    #[test]
    fn blank_tag_key_is_rejected() {
        let err = RunConfig::new("   ", "x", false).unwrap_err();
        assert!(matches!(err, TaggerError::InvalidConfig(_)));
    }

    #[test]
    fn tag_key_is_trimmed() {
        let config = RunConfig::new(" generation ", "gen1", true).expect("config");
        assert_eq!(config.tag.key, "generation");
        assert!(config.dry_run);
    }
}
