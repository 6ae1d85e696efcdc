//! Flow dump driver
//!
//! Runs one session end to end: trigger, wait, decode. The caller subscribes
//! `notifications` before calling so that a fast producer cannot finish
//! between the trigger and the first wait.

use crate::decoder::{decode_artifact, FlowRecord};
use crate::descriptor::SessionDescriptor;
use crate::errors::{FlowDumpError, Result};
use crate::state::{DeviceMetadata, NotificationSource, StateReader};
use crate::trigger::{CommandRunner, SessionTrigger};
use crate::watcher::{wait_for_session, WatchOptions, WatchOutcome, WatchStatus};
use crate::{log_op_end, log_op_start};
use flowdump_core_types::SessionName;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

/// Operator-facing parameters of one dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpRequest {
    pub flow_state: bool,
    pub max_flows: u32,
    pub timeout_secs: u64,
    /// Only report the artifact path, do not decode it
    pub file_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DumpReport {
    pub session: SessionName,
    pub outcome: WatchOutcome,
    /// Decoded records; always empty under `file_only`
    pub records: Vec<FlowRecord>,
}

impl DumpReport {
    pub fn result_path(&self) -> Option<&Path> {
        self.outcome.result_path.as_deref()
    }
}

/// Fail unless the host's `switch_type` is `expected`
pub fn check_device_role<M: DeviceMetadata + ?Sized>(metadata: &mut M, expected: &str) -> Result<()> {
    let found = metadata.switch_type()?;
    match found.as_deref() {
        Some(role) if role == expected => Ok(()),
        other => Err(FlowDumpError::WrongDeviceRole {
            expected: expected.to_string(),
            found: other.unwrap_or("unset").to_string(),
        }),
    }
}

/// Trigger a session, wait for it, and decode its artifact
///
/// A failed session is an error. Timeout and interrupt are not: the report
/// then holds whatever the last observed record pointed at.
pub fn run_flow_dump<R, N, S>(
    request: DumpRequest,
    trigger: &SessionTrigger<R>,
    notifications: &mut N,
    store: &mut S,
    grace: Duration,
    poll_interval: Duration,
    interrupted: &AtomicBool,
) -> Result<DumpReport>
where
    R: CommandRunner,
    N: NotificationSource + ?Sized,
    S: StateReader + ?Sized,
{
    let descriptor =
        SessionDescriptor::new(request.flow_state, request.max_flows, request.timeout_secs)?;
    let session = descriptor.session.clone();

    trigger.trigger(&descriptor)?;

    let start = Instant::now();
    log_op_start!("wait_for_session", session = %session);
    let options = WatchOptions {
        timeout: Duration::from_secs(request.timeout_secs),
        grace,
        poll_interval,
    };
    let outcome = wait_for_session(notifications, store, &session, options, interrupted)?;
    log_op_end!(
        "wait_for_session",
        duration_ms = start.elapsed().as_millis() as u64,
        session = %session,
        status = ?outcome.status
    );

    match outcome.status {
        WatchStatus::Failed => return Err(FlowDumpError::SessionFailed { session }),
        WatchStatus::TimedOut => {
            tracing::warn!(session = %session, state = ?outcome.state, "flow dump timed out");
        }
        WatchStatus::Interrupted => {
            tracing::warn!(session = %session, "flow dump interrupted");
        }
        WatchStatus::Completed => {}
    }

    let records = if request.file_only {
        Vec::new()
    } else {
        decode_artifact(outcome.result_path.as_deref())
    };

    Ok(DumpReport {
        session,
        outcome,
        records,
    })
}
