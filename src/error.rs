//
// error.rs
// Update-Golden-AMI-rs
//
// Error taxonomy for setup failures and per-region pipeline failures.
//
// Thales Matheus Mendonça Santos - October 2026

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TaggerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("error fetching enabled regions: {0}")]
    RegionDiscovery(String),
    #[error("{region}: error fetching images: {message}")]
    ImageListing { region: String, message: String },
    #[error("{region}: failed to tag image {image_id}: {message}")]
    Tagging {
        region: String,
        image_id: String,
        message: String,
    },
    #[error("{region}: cancelled before completion")]
    Cancelled { region: String },
    #[error("{region}: worker task failed: {message}")]
    WorkerPanicked { region: String, message: String },
}

impl TaggerError {
    /// Region the failure belongs to; `None` for run-wide setup failures.
    pub fn region(&self) -> Option<&str> {
        match self {
            TaggerError::InvalidConfig(_) | TaggerError::RegionDiscovery(_) => None,
            TaggerError::ImageListing { region, .. }
            | TaggerError::Tagging { region, .. }
            | TaggerError::Cancelled { region }
            | TaggerError::WorkerPanicked { region, .. } => Some(region.as_str()),
        }
    }
}
