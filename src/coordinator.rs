//
// coordinator.rs
// Update-Golden-AMI-rs
//
// Discovers enabled regions, runs one worker per region concurrently and collects every region's report.
//
// Thales Matheus Mendonça Santos - October 2026

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::TaggerError;
use crate::models::{Region, RegionReport, RunSummary};
use crate::output::ReportSink;
use crate::provider::ImageProvider;
use crate::worker;

/// Runs the whole tagging pass.
///
/// Only region discovery is fatal. Every other failure is recorded in the
/// owning region's report while the remaining regions carry on.
pub async fn run(
    provider: Arc<dyn ImageProvider>,
    config: Arc<RunConfig>,
    cancel: CancellationToken,
    sink: Arc<dyn ReportSink>,
) -> Result<RunSummary, TaggerError> {
    info!(dry_run = config.dry_run, "discovering enabled regions");
    let enabled = provider
        .list_enabled_regions()
        .await
        .map_err(|e| TaggerError::RegionDiscovery(format!("{:#}", e)))?;

    let regions = select_regions(enabled, &config.regions);
    info!(
        "dispatching {} region worker(s), concurrency limit: {}",
        regions.len(),
        config
            .max_concurrency
            .map_or_else(|| "none".to_string(), |n| n.to_string())
    );

    let semaphore = config
        .max_concurrency
        .map(|n| Arc::new(Semaphore::new(n.get())));

    let mut handles = Vec::with_capacity(regions.len());
    for region in regions {
        let provider = Arc::clone(&provider);
        let config = Arc::clone(&config);
        let cancel = cancel.clone();
        let semaphore = semaphore.clone();
        let sink = Arc::clone(&sink);
        let name = region.name.clone();

        let handle = tokio::spawn(async move {
            // Held until the worker returns; `None` when the fan-out is unbounded.
            let _permit = match acquire_slot(semaphore, &cancel).await {
                Some(permit) => permit,
                None => return cancelled_report(&region, &config),
            };
            debug!(region = %region.name, "worker started");
            worker::process_region(provider.as_ref(), &region, &config, &cancel, sink.as_ref()).await
        });
        handles.push((name, handle));
    }

    // Single barrier: every worker is awaited before the summary is built.
    let mut reports = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => RegionReport {
                region: name.clone(),
                dry_run: config.dry_run,
                images: Vec::new(),
                error: Some(TaggerError::WorkerPanicked {
                    region: name,
                    message: e.to_string(),
                }),
            },
        };
        reports.push(report);
    }
    reports.sort_by(|a, b| a.region.cmp(&b.region));

    sink.emit("Done!".to_string());

    Ok(RunSummary {
        dry_run: config.dry_run,
        tag: config.tag.clone(),
        regions: reports,
    })
}

/// Keeps the enabled regions named in `requested`, or all of them when it is empty.
fn select_regions(enabled: Vec<Region>, requested: &[String]) -> Vec<Region> {
    // Drop repeated names first so no region ever gets two workers.
    let mut seen = BTreeSet::new();
    let enabled: Vec<Region> = enabled
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect();

    if requested.is_empty() {
        return enabled;
    }

    // Unknown names are only warned about; the rest of the run still proceeds.
    for name in requested {
        if !seen.contains(name) {
            warn!("region {} is not enabled for this account, skipping", name);
        }
    }
    enabled
        .into_iter()
        .filter(|r| requested.contains(&r.name))
        .collect()
}

/// Waits for a worker slot, giving up as soon as the run is cancelled.
///
/// `Some(None)` means the fan-out is unbounded; `None` means cancelled while queued.
async fn acquire_slot(
    semaphore: Option<Arc<Semaphore>>,
    cancel: &CancellationToken,
) -> Option<Option<OwnedSemaphorePermit>> {
    let Some(sem) = semaphore else {
        return Some(None);
    };
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        permit = sem.acquire_owned() => permit.ok().map(Some),
    }
}

fn cancelled_report(region: &Region, config: &RunConfig) -> RegionReport {
    RegionReport {
        region: region.name.clone(),
        dry_run: config.dry_run,
        images: Vec::new(),
        error: Some(TaggerError::Cancelled {
            region: region.name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(names: &[&str]) -> Vec<Region> {
        names.iter().map(|n| Region::new(*n)).collect()
    }

    #[test]
    fn all_enabled_regions_are_kept_without_a_filter() {
        let selected = select_regions(regions(&["us-east-1", "eu-west-1"]), &[]);
        assert_eq!(selected, regions(&["us-east-1", "eu-west-1"]));
    }

    #[test]
    fn requested_regions_restrict_the_run() {
        let requested = vec!["eu-west-1".to_string(), "ap-nowhere-9".to_string()];
        let selected = select_regions(regions(&["us-east-1", "eu-west-1"]), &requested);
        assert_eq!(selected, regions(&["eu-west-1"]));
    }

    #[tokio::test]
    async fn queued_worker_leaves_when_cancelled() {
        // No permits left: only the cancellation can release the waiter.
        let sem = Arc::new(Semaphore::new(0));
        let cancel = CancellationToken::new();
        let waiter = tokio::spawn({
            let cancel = cancel.clone();
            async move { acquire_slot(Some(sem), &cancel).await.is_none() }
        });

        cancel.cancel();
        let gave_up = tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("waiter returned")
            .expect("join");
        assert!(gave_up);
    }

    #[tokio::test]
    async fn unbounded_slot_is_immediate() {
        let cancel = CancellationToken::new();
        assert!(matches!(acquire_slot(None, &cancel).await, Some(None)));
    }

    #[tokio::test]
    async fn free_permit_is_granted() {
        let sem = Arc::new(Semaphore::new(1));
        let slot = acquire_slot(Some(Arc::clone(&sem)), &CancellationToken::new()).await;
        assert!(matches!(slot, Some(Some(_))));
        assert_eq!(sem.available_permits(), 0);
    }

    #[test]
    fn duplicate_regions_get_a_single_worker() {
        let selected = select_regions(regions(&["us-east-1", "us-east-1"]), &[]);
        assert_eq!(selected.len(), 1);
    }
}
