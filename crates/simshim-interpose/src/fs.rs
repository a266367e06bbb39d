//! File-write interception.
//!
//! The hosted library overwrites its consensus artifact in place, which
//! loses history the simulation wants to inspect afterwards. The intercept
//! persists a numbered snapshot copy of every tracked write — versioned by
//! the calling thread's counter, so each node keeps its own sequence —
//! and then forwards the write to the real entry point. The snapshot is
//! best-effort: a failure is reported and the forwarded write proceeds.

use std::io;
use std::path::{Path, PathBuf};

use simshim_core::context::with_context;
use thiserror::Error;

use crate::report;

/// Artifact name whose writes are snapshotted.
pub const TRACKED_ARTIFACT: &str = "cached-consensus";

/// A failed snapshot copy. Never propagated to the hosted library.
#[derive(Debug, Error)]
#[error("failed to persist snapshot `{}`: {source}", .path.display())]
pub struct SnapshotError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Replacement `write_str_to_file`.
///
/// Tracked artifacts are first copied to `<path>.NNN` (three-digit,
/// sequential per calling thread, starting at `.000`); all writes are then
/// forwarded to the real entry point, whose status is returned.
pub fn write_str_to_file(path: &Path, content: &str, binary: bool) -> i32 {
    if is_tracked(path) {
        let index = with_context(|ctx| ctx.next_artifact_index());
        if let Err(err) = persist_snapshot(path, content, index) {
            report::warn("snapshot_write_failed", Some(path), Some(err.to_string()));
        }
    }

    with_context(|ctx| (ctx.entries().write_str_to_file)(path, content, binary))
}

fn is_tracked(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(TRACKED_ARTIFACT))
        .unwrap_or(false)
}

fn snapshot_path(path: &Path, index: u32) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index:03}"));
    PathBuf::from(name)
}

fn persist_snapshot(path: &Path, content: &str, index: u32) -> Result<(), SnapshotError> {
    let snapshot = snapshot_path(path, index);
    std::fs::write(&snapshot, content).map_err(|source| SnapshotError {
        path: snapshot,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_paths_match_on_file_name_suffix() {
        assert!(is_tracked(Path::new("/sim/node0/cached-consensus")));
        assert!(is_tracked(Path::new("cached-consensus")));
        // The library writes through a temp name during atomic replace.
        assert!(is_tracked(Path::new("/sim/node0/unverified-cached-consensus")));
        assert!(!is_tracked(Path::new("/sim/node0/cached-descriptors")));
        assert!(!is_tracked(Path::new("/sim/cached-consensus/state")));
    }

    #[test]
    fn snapshot_paths_use_three_digit_suffixes() {
        let base = Path::new("/sim/node0/cached-consensus");
        assert_eq!(
            snapshot_path(base, 0),
            PathBuf::from("/sim/node0/cached-consensus.000")
        );
        assert_eq!(
            snapshot_path(base, 41),
            PathBuf::from("/sim/node0/cached-consensus.041")
        );
        assert_eq!(
            snapshot_path(base, 1000),
            PathBuf::from("/sim/node0/cached-consensus.1000")
        );
    }

    #[test]
    fn snapshot_failure_formats_with_path() {
        let err = persist_snapshot(
            Path::new("/nonexistent-simshim-dir/cached-consensus"),
            "doc",
            0,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/nonexistent-simshim-dir/cached-consensus.000"));
    }
}
