//
// output.rs
// Update-Golden-AMI-rs
//
// Destination for the user-facing report, confirmation and completion lines.
//
// Thales Matheus Mendonça Santos - October 2026

/// Receives one finished line at a time; workers in different regions share it.
pub trait ReportSink: Send + Sync {
    fn emit(&self, line: String);
}

/// Writes every line to stdout, the destination used by the CLI.
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, line: String) {
        println!("{}", line);
    }
}
