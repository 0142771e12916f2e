//
// worker.rs
// Update-Golden-AMI-rs
//
// Per-region pipeline: list owned public images, keep the untagged ones, then report or tag them.
//
// Thales Matheus Mendonça Santos - October 2026

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::error::TaggerError;
use crate::filter;
use crate::models::{Region, RegionReport};
use crate::output::ReportSink;
use crate::provider::ImageProvider;

/// Runs list -> filter -> act for a single region.
///
/// Tagging is sequential and stops at the first failing call. Images tagged
/// before the failure stay tagged and are listed in the report.
pub async fn process_region(
    provider: &dyn ImageProvider,
    region: &Region,
    config: &RunConfig,
    cancel: &CancellationToken,
    sink: &dyn ReportSink,
) -> RegionReport {
    let mut report = RegionReport {
        region: region.name.clone(),
        dry_run: config.dry_run,
        images: Vec::new(),
        error: None,
    };

    let listed = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            report.error = Some(TaggerError::Cancelled { region: region.name.clone() });
            return report;
        }
        res = provider.list_owned_public_images(region) => res,
    };

    let images = match listed {
        Ok(images) => images,
        Err(e) => {
            let err = TaggerError::ImageListing {
                region: region.name.clone(),
                message: format!("{:#}", e),
            };
            error!("{}", err);
            report.error = Some(err);
            return report;
        }
    };

    let total = images.len();
    let selected = filter::filter_untagged(images, &config.tag.key);
    debug!(
        region = %region.name,
        total,
        selected = selected.len(),
        "filtered images lacking tag '{}'",
        config.tag.key
    );

    let tag = &config.tag;

    if config.dry_run {
        for img in selected {
            sink.emit(format!(
                "{}: Would have tagged image {} with tag '{}' = '{}'",
                region.name, img.image_id, tag.key, tag.value
            ));
            report.images.push(img.image_id);
        }
        return report;
    }

    for img in selected {
        // An in-flight CreateTags call is allowed to finish so the report stays accurate.
        if cancel.is_cancelled() {
            report.error = Some(TaggerError::Cancelled {
                region: region.name.clone(),
            });
            return report;
        }

        if let Err(e) = provider.create_tag(region, &img.image_id, tag).await {
            let err = TaggerError::Tagging {
                region: region.name.clone(),
                image_id: img.image_id,
                message: format!("{:#}", e),
            };
            error!("{}", err);
            report.error = Some(err);
            return report;
        }

        sink.emit(format!(
            "{}: Tagged image {} with tag '{}' = '{}'",
            region.name, img.image_id, tag.key, tag.value
        ));
        report.images.push(img.image_id);
    }

    info!(region = %region.name, tagged = report.images.len(), "region complete");
    report
}
