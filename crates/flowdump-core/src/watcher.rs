//! Completion watcher
//!
//! Waits for a session to reach a terminal state:
//!
//! ```text
//! WAITING ──▶ COMPLETED | FAILED | TIMED_OUT | INTERRUPTED
//! ```
//!
//! A notification only tells the watcher that the state table changed. For
//! every notification on its own session the watcher re-reads the full record
//! from the store and decides from that.

use crate::errors::Result;
use crate::state::{NotificationSource, SessionState, StateReader};
use flowdump_core_types::SessionName;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Timing parameters of a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Session timeout requested from the producer
    pub timeout: Duration,
    /// Added to `timeout`; the producer's failure notice can land slightly late
    pub grace: Duration,
    /// Upper bound on a single wait, i.e. how often the interrupt flag is seen
    pub poll_interval: Duration,
}

impl WatchOptions {
    /// `None` when timeout plus grace does not fit in an `Instant`; the wait
    /// then has no deadline
    pub fn deadline_after(&self, start: Instant) -> Option<Instant> {
        self.timeout
            .checked_add(self.grace)
            .and_then(|total| start.checked_add(total))
    }
}

/// How the wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Completed,
    Failed,
    TimedOut,
    Interrupted,
}

/// Result of a wait: how it ended plus the last state and result path seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOutcome {
    pub status: WatchStatus,
    pub state: Option<SessionState>,
    pub result_path: Option<PathBuf>,
}

/// Wait for `session` to complete or fail
///
/// Returns early with [`WatchStatus::Interrupted`] once `interrupted` is set,
/// and with [`WatchStatus::TimedOut`] once timeout plus grace has elapsed. In
/// both cases the outcome carries whatever was last observed. Store and
/// channel errors are propagated.
pub fn wait_for_session<N, S>(
    notifications: &mut N,
    store: &mut S,
    session: &SessionName,
    options: WatchOptions,
    interrupted: &AtomicBool,
) -> Result<WatchOutcome>
where
    N: NotificationSource + ?Sized,
    S: StateReader + ?Sized,
{
    let deadline = options.deadline_after(Instant::now());
    let mut last_state: Option<SessionState> = None;
    let mut last_path: Option<PathBuf> = None;

    let status = loop {
        if interrupted.load(Ordering::SeqCst) {
            tracing::debug!(session = %session, "wait interrupted");
            break WatchStatus::Interrupted;
        }

        let max_wait = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::debug!(session = %session, "wait timed out");
                    break WatchStatus::TimedOut;
                }
                options.poll_interval.min(deadline - now)
            }
            None => options.poll_interval,
        };

        let Some(notification) = notifications.next_event(max_wait)? else {
            continue;
        };
        if notification.key != session.as_str() {
            continue;
        }
        tracing::trace!(session = %session, operation = %notification.operation, "state change");

        let Some(record) = store.read_state(session)? else {
            continue;
        };
        if let Some(path) = record.result_path {
            last_path = Some(path);
        }
        if let Some(state) = record.state {
            tracing::debug!(session = %session, state = %state, "session state observed");
            let terminal = state.is_terminal();
            let completed = state == SessionState::Completed;
            last_state = Some(state);
            if terminal {
                break if completed {
                    WatchStatus::Completed
                } else {
                    WatchStatus::Failed
                };
            }
        }
    };

    Ok(WatchOutcome {
        status,
        state: last_state,
        result_path: last_path,
    })
}
