#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use flowdump_core::errors::Result;
use flowdump_core::state::{Notification, NotificationSource, StateReader, StateRecord};
use flowdump_core_types::SessionName;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// Write `lines` to `path` as a gzip JSON-lines artifact
pub fn write_gz_lines(path: &Path, lines: &[&str]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    for line in lines {
        encoder.write_all(line.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
    }
    encoder.finish().unwrap();
}

/// In-memory state table plus its notification queue
///
/// Clones share the same table, so a test can hand one clone to the watcher
/// as the store, another as the notification source, and keep a third to
/// play the producer.
#[derive(Clone, Default)]
pub struct FakeStateDb {
    inner: Rc<RefCell<FakeInner>>,
}

#[derive(Default)]
struct FakeInner {
    records: HashMap<String, StateRecord>,
    events: VecDeque<Notification>,
    reads: usize,
}

impl FakeStateDb {
    /// Update a record and queue a notification for it
    pub fn publish(&self, session: &str, record: StateRecord) {
        let mut inner = self.inner.borrow_mut();
        inner.records.insert(session.to_string(), record);
        inner.events.push_back(Notification {
            key: session.to_string(),
            operation: "hset".to_string(),
        });
    }

    /// Queue a notification without touching any record
    pub fn notify_only(&self, key: &str) {
        self.inner.borrow_mut().events.push_back(Notification {
            key: key.to_string(),
            operation: "hset".to_string(),
        });
    }

    /// Update a record without a notification
    pub fn set_silently(&self, session: &str, record: StateRecord) {
        self.inner
            .borrow_mut()
            .records
            .insert(session.to_string(), record);
    }

    pub fn reads(&self) -> usize {
        self.inner.borrow().reads
    }
}

impl StateReader for FakeStateDb {
    fn read_state(&mut self, session: &SessionName) -> Result<Option<StateRecord>> {
        let mut inner = self.inner.borrow_mut();
        inner.reads += 1;
        Ok(inner.records.get(session.as_str()).cloned())
    }
}

impl NotificationSource for FakeStateDb {
    fn next_event(&mut self, max_wait: Duration) -> Result<Option<Notification>> {
        let event = self.inner.borrow_mut().events.pop_front();
        if event.is_none() {
            std::thread::sleep(max_wait);
        }
        Ok(event)
    }
}
