//
// lib.rs
// Update-Golden-AMI-rs
//
// Exposes the crate's modules and re-exports the CLI entry point for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - October 2026

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod ec2;
pub mod error;
pub mod filter;
pub mod models;
pub mod output;
pub mod provider;
pub mod report;
pub mod worker;

pub use cli::{run as run_cli, Cli};
pub use error::TaggerError;
pub use provider::ImageProvider;
