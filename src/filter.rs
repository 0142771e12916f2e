//
// filter.rs
// Update-Golden-AMI-rs
//
// Selects images whose tag set has no entry for the target key.
//
// Thales Matheus Mendonça Santos - October 2026

use crate::models::Image;

pub fn lacks_tag(image: &Image, key: &str) -> bool {
    !image.has_tag_key(key)
}

/// Keeps the images lacking `key`, preserving input order.
pub fn filter_untagged(images: Vec<Image>, key: &str) -> Vec<Image> {
    images.into_iter().filter(|img| lacks_tag(img, key)).collect()
}
