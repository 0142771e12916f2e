//
// cli.rs
// Update-Golden-AMI-rs
//
// Defines the CLI surface with Clap, sets up logging and signal handling, and drives one tagging run.
//
// Thales Matheus Mendonça Santos - October 2026

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{RunConfig, DEFAULT_TAG_KEY, DEFAULT_TAG_VALUE};
use crate::ec2::Ec2Provider;
use crate::output::{ReportSink, StdoutSink};
use crate::provider::ImageProvider;
use crate::{coordinator, report};

/// Tags every owned, publicly launchable AMI that lacks the target tag, in all enabled regions.
#[derive(Parser, Debug)]
#[command(name = "update-golden-ami")]
#[command(about = "Tag legacy golden AMIs across all enabled regions", long_about = None)]
pub struct Cli {
    /// Show which AMIs would be tagged without tagging them
    #[arg(long)]
    pub dry_run: bool,

    /// Tag key whose absence selects an image
    #[arg(long, env = "GOLDEN_AMI_TAG_KEY", default_value = DEFAULT_TAG_KEY)]
    pub tag_key: String,

    /// Value written under the tag key
    #[arg(long, env = "GOLDEN_AMI_TAG_VALUE", default_value = DEFAULT_TAG_VALUE)]
    pub tag_value: String,

    /// Maximum number of regions processed at once (default: all at once)
    #[arg(long)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Only process these regions (repeatable)
    #[arg(long = "region", value_name = "NAME")]
    pub regions: Vec<String>,

    /// Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> anyhow::Result<RunConfig> {
        Ok(RunConfig::new(&self.tag_key, &self.tag_value, self.dry_run)?
            .with_max_concurrency(self.max_concurrency)
            .with_regions(self.regions.clone()))
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Arc::new(cli.run_config()?);
    let provider: Arc<dyn ImageProvider> = Arc::new(Ec2Provider::load().await);

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if on_interrupt(&signal_token) == Interrupt::ForceQuit {
                std::process::exit(130);
            }
        }
    });

    let sink: Arc<dyn ReportSink> = Arc::new(StdoutSink);
    let summary = coordinator::run(provider, config, cancel, sink).await?;

    report::print_summary(&summary);
    if let Some(path) = cli.summary_json.as_deref() {
        report::write_json(&summary, path)?;
    }

    let failed = summary.failed_regions().count();
    if failed > 0 {
        bail!("{} of {} region(s) failed", failed, summary.regions.len());
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    Cancel,
    ForceQuit,
}

/// First Ctrl-C stops workers gracefully, a second one force-quits.
fn on_interrupt(token: &CancellationToken) -> Interrupt {
    if token.is_cancelled() {
        return Interrupt::ForceQuit;
    }
    warn!("interrupt received, stopping region workers (press Ctrl-C again to force quit)");
    token.cancel();
    Interrupt::Cancel
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "update_golden_ami=debug"
    } else {
        "update_golden_ami=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_tag() {
        let cli = Cli::try_parse_from(["update-golden-ami"]).expect("parse");
        assert!(!cli.dry_run);
        assert!(cli.regions.is_empty());
        let config = cli.run_config().expect("config");
        assert_eq!(config.tag.key, "version");
        assert_eq!(config.tag.value, "legacy-x86_64");
    }

    #[test]
    fn flags_flow_into_run_config() {
        let cli = Cli::try_parse_from([
            "update-golden-ami",
            "--dry-run",
            "--tag-key",
            "generation",
            "--tag-value",
            "gen1",
            "--max-concurrency",
            "4",
            "--region",
            "us-east-1",
            "--region",
            "eu-west-1",
        ])
        .expect("parse");
        let config = cli.run_config().expect("config");
        assert!(config.dry_run);
        assert_eq!(config.tag.key, "generation");
        assert_eq!(config.max_concurrency.map(NonZeroUsize::get), Some(4));
        assert_eq!(config.regions, vec!["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn second_interrupt_forces_quit() {
        let token = CancellationToken::new();
        assert_eq!(on_interrupt(&token), Interrupt::Cancel);
        assert!(token.is_cancelled());
        assert_eq!(on_interrupt(&token), Interrupt::ForceQuit);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_from(["update-golden-ami", "--max-concurrency", "0"]).is_err());
    }
}
