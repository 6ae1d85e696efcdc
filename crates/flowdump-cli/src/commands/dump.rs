//! Dump command
//!
//! Usage: flowdump dump [--flow-state <BOOL>] [--timeout <SECS>] [--max-flows <N>] [--file-only]

use crate::output::print_records;
use clap::{ArgAction, Args};
use flowdump_core::config::{FlowDumpConfig, DEFAULT_CONFIG_PATH};
use flowdump_core::dump::{check_device_role, run_flow_dump, DumpRequest};
use flowdump_core::errors::ExError;
use flowdump_core::trigger::{ProcessRunner, SessionTrigger};
use flowdump_core::{log_op_error, FlowDumpError};
use flowdump_store::{KeyspaceSubscriber, RedisConfigDb, RedisStateStore};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Include flow state in the dump
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub flow_state: bool,

    /// Seconds the producer may take before the session times out
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Maximum number of flows to dump
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_flows: u32,

    /// Print only the artifact path instead of its decoded contents
    #[arg(long)]
    pub file_only: bool,
}

impl DumpArgs {
    fn request(&self) -> DumpRequest {
        DumpRequest {
            flow_state: self.flow_state,
            max_flows: self.max_flows,
            timeout_secs: self.timeout,
            file_only: self.file_only,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FlowDumpConfig, FlowDumpError> {
    match path {
        Some(path) => FlowDumpConfig::load(path, true),
        None => FlowDumpConfig::load(Path::new(DEFAULT_CONFIG_PATH), false),
    }
}

/// Execute dump command
pub fn execute(args: DumpArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    match dump(&args, config_path) {
        Ok(()) => Ok(()),
        Err(e) => {
            log_op_error!(
                "flow_dump",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(ExError::from(e).into())
        }
    }
}

fn dump(args: &DumpArgs, config_path: Option<&Path>) -> Result<(), FlowDumpError> {
    let config = load_config(config_path)?;

    let mut config_db = RedisConfigDb::connect(&config.config_db_url)?;
    check_device_role(&mut config_db, &config.expected_switch_type)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&interrupted)).map_err(|e| {
            FlowDumpError::Internal {
                message: format!("cannot install signal handler: {}", e),
            }
        })?;
    }

    let mut store = RedisStateStore::connect(&config.state_db_url, config.state_table.as_str())?;
    let mut subscriber_conn = flowdump_store::connect(&config.state_db_url)?;
    let mut notifications = KeyspaceSubscriber::subscribe(
        &mut subscriber_conn,
        config.state_db_index,
        &config.state_table,
    )?;

    let trigger = SessionTrigger::new(
        config.request_path.clone(),
        config.request_table.as_str(),
        config.apply_command.clone(),
        ProcessRunner,
    );

    let report = run_flow_dump(
        args.request(),
        &trigger,
        &mut notifications,
        &mut store,
        config.grace_period(),
        config.poll_interval(),
        &interrupted,
    )?;
    tracing::debug!(
        session = %report.session,
        status = ?report.outcome.status,
        records = report.records.len(),
        "flow dump finished"
    );

    if args.file_only {
        if let Some(path) = report.result_path() {
            println!("{}", path.display());
        }
        Ok(())
    } else {
        print_records(&report.records).map_err(|e| FlowDumpError::Serialization {
            message: e.to_string(),
        })
    }
}
