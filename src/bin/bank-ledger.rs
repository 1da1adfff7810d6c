use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::{bin_utils::LineError, processor::TransactionProcessError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = bank_ledger::bin_utils::Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match err {
            // business rule rejections, not problems with the input itself
            LineError::Rejected(TransactionProcessError::AccountErr(err)) => {
                info!(line, "{err}")
            }
            err => warn!(line, "{err}"),
        }),
    };
    service.run()
}
