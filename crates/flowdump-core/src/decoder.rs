//! Result decoder
//!
//! Reads the gzip-compressed JSON-lines artifact of a finished session. Lines
//! are independent: a bad line is skipped. A missing or undecodable file is
//! reported as no records at all.

use crate::fields::relabel_key;
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One decoded flow, keys already relabeled, in source field order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlowRecord(Map<String, Value>);

impl FlowRecord {
    /// Relabel every key of a raw object
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        Self(
            raw.into_iter()
                .map(|(key, value)| (relabel_key(&key), value))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

/// Decode a single artifact line; `None` for anything but a JSON object
pub fn decode_line(line: &[u8]) -> Option<FlowRecord> {
    match serde_json::from_slice::<Value>(line) {
        Ok(Value::Object(raw)) => Some(FlowRecord::from_raw(raw)),
        _ => None,
    }
}

/// Decode every line of a decompressed JSON-lines stream
///
/// Any read or decompression error discards the whole stream.
pub fn decode_stream<R: BufRead>(mut reader: R) -> Vec<FlowRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "artifact unreadable, discarding");
                return Vec::new();
            }
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match decode_line(&line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, decoded = records.len(), "skipped undecodable lines");
    }
    records
}

/// Decode the artifact at `path`
///
/// `None`, a missing file, or an unreadable file all yield an empty list.
pub fn decode_artifact(path: Option<&Path>) -> Vec<FlowRecord> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Vec::new();
    };
    match File::open(path) {
        Ok(file) => decode_stream(BufReader::new(MultiGzDecoder::new(file))),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "artifact not readable");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line_relabels() {
        let record = decode_line(br#"{"9": "10.0.0.1", "si": "10.0.0.2", "note": 1}"#).unwrap();
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["REVERSE_FLOW_SRC_IP", "SRC_IP", "note"]);
        assert_eq!(record.get("SRC_IP"), Some(&Value::from("10.0.0.2")));
    }

    #[test]
    fn test_non_object_lines_rejected() {
        assert!(decode_line(b"[1, 2]").is_none());
        assert!(decode_line(b"42").is_none());
        assert!(decode_line(b"{not json").is_none());
        assert!(decode_line(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_plain_stream_skips_bad_lines() {
        let input = b"{\"a\":1}\ngarbage\n\n{\"b\":2}\n{\"c\":3}";
        let records = decode_stream(&input[..]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("c"), Some(&Value::from(3)));
    }

    #[test]
    fn test_none_path_is_empty() {
        assert!(decode_artifact(None).is_empty());
        assert!(decode_artifact(Some(Path::new(""))).is_empty());
    }
}
