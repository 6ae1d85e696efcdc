//! Decode command
//!
//! Usage: flowdump decode <PATH>

use crate::output::print_records;
use clap::Args;
use flowdump_core::decode_artifact;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Path to a gzip-compressed JSON-lines artifact
    pub path: PathBuf,
}

pub fn execute(args: DecodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = decode_artifact(Some(&args.path));
    tracing::debug!(path = %args.path.display(), records = records.len(), "artifact decoded");
    print_records(&records)
}
