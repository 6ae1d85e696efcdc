//! flowdump CLI
//!
//! Trigger a flow dump on a DPU and print the decoded flows

use clap::{Parser, Subcommand};
use flowdump_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;
mod output;

#[derive(Debug, Parser)]
#[command(name = "flowdump")]
#[command(about = "Dump the flow table of a DPU", long_about = None)]
struct Cli {
    /// Configuration file (defaults to /etc/sonic/flowdump.toml when present)
    #[arg(long, global = true, env = "FLOWDUMP_CONFIG")]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Request a flow dump and wait for its result
    Dump(commands::dump::DumpArgs),
    /// Decode an existing dump artifact
    Decode(commands::decode::DecodeArgs),
}

fn main() {
    // Help and version keep clap's exit code 0; every other argument error exits 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.exit_code() == 0 { 0 } else { 1 });
        }
    };

    logging_facility::init(match (cli.json_logs, cli.verbose) {
        (true, _) => Profile::Json,
        (false, true) => Profile::Verbose,
        (false, false) => Profile::Quiet,
    });

    let result = match cli.command {
        Commands::Dump(args) => commands::dump::execute(args, cli.config.as_deref()),
        Commands::Decode(args) => commands::decode::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
