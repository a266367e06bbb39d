//! Structured JSONL reporting.
//!
//! Best-effort side effects are not allowed to fail the hosted library's
//! own operation, so their failures are reported here instead: one JSON
//! object per line, written to stderr by default. Tests redirect the sink.

use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Level {
    Warn,
}

/// One reported event.
#[derive(Debug, Serialize)]
pub(crate) struct LogEntry<'a> {
    pub timestamp_ms: u128,
    pub level: Level,
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

static SINK: Mutex<Option<Box<dyn Write + Send>>> = Mutex::new(None);

/// Redirects report output; `None` restores the stderr default.
#[cfg(test)]
pub(crate) fn set_sink(sink: Option<Box<dyn Write + Send>>) {
    *SINK.lock() = sink;
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

/// Emits a warning record. Failure to emit is itself swallowed: reporting
/// is the last resort, not another failure source.
pub(crate) fn warn(event: &str, path: Option<&Path>, detail: Option<String>) {
    let entry = LogEntry {
        timestamp_ms: now_ms(),
        level: Level::Warn,
        event,
        path: path.map(|p| p.display().to_string()),
        detail,
    };
    let Ok(line) = serde_json::to_string(&entry) else {
        return;
    };
    let mut sink = SINK.lock();
    match sink.as_mut() {
        Some(writer) => {
            let _ = writeln!(writer, "{line}");
        }
        None => {
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn warn_emits_one_json_line() {
        let buf = SharedBuf::default();
        set_sink(Some(Box::new(buf.clone())));
        warn(
            "snapshot_write_failed",
            Some(Path::new("/sim/node3/cached-consensus")),
            Some("permission denied".to_owned()),
        );
        set_sink(None);

        let bytes = buf.0.lock().clone();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["level"], "warn");
        assert_eq!(value["event"], "snapshot_write_failed");
        assert_eq!(value["path"], "/sim/node3/cached-consensus");
        assert_eq!(value["detail"], "permission denied");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let entry = LogEntry {
            timestamp_ms: 1,
            level: Level::Warn,
            event: "e",
            path: None,
            detail: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("path").is_none());
        assert!(value.get("detail").is_none());
    }
}
