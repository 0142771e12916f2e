//
// main.rs
// Update-Golden-AMI-rs
//
// Tokio entry point that hands off execution to the CLI layer.
//
// Thales Matheus Mendonça Santos - October 2026

use update_golden_ami::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A returned error prints the cause chain and exits non-zero.
    cli::run().await
}
