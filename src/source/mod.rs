//! Capture log access.
//!
//! [`LogSource`] is the lookup seam the payload view consumes: resolve a
//! record by its stable position, or report that no record exists there.
//! Absence of the source itself (no active capture session) is a distinct
//! condition and is modeled by the caller passing `None` for the source.
//!
//! [`HttpLog`] is the in-memory store, populated from a JSONL capture file
//! by [`load_capture`]. Malformed lines are non-fatal: they are logged and
//! skipped so a partially corrupted capture still opens.

use crate::model::{CaptureError, HttpRecord};
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, warn};

/// Lookup of request records by stable position.
pub trait LogSource {
    /// Record at `index`, or `None` when no record exists there.
    fn get_request(&self, index: usize) -> Option<Rc<HttpRecord>>;

    /// Number of records currently in the log.
    fn len(&self) -> usize;

    /// Whether the log holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store of captured HTTP transactions.
///
/// Records keep their position for the lifetime of the log; lookups are
/// O(1) reference fetches with no I/O.
#[derive(Debug, Default)]
pub struct HttpLog {
    records: Vec<Rc<HttpRecord>>,
}

impl HttpLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log over the given records, preserving order.
    pub fn from_records(records: Vec<HttpRecord>) -> Self {
        Self {
            records: records.into_iter().map(Rc::new).collect(),
        }
    }

    /// Append a record at the next position.
    pub fn push(&mut self, record: HttpRecord) {
        self.records.push(Rc::new(record));
    }
}

impl LogSource for HttpLog {
    fn get_request(&self, index: usize) -> Option<Rc<HttpRecord>> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Load a JSONL capture file into an [`HttpLog`].
///
/// One JSON record per line. Lines that fail to parse are logged with
/// their line number and skipped.
pub fn load_capture(path: &Path) -> Result<HttpLog, CaptureError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CaptureError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(CaptureError::Io(e)),
    };

    let mut log = HttpLog::new();
    let mut skipped = 0usize;
    for (line_number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HttpRecord>(line) {
            Ok(record) => log.push(record),
            Err(e) => {
                let err = CaptureError::InvalidRecord {
                    line: line_number + 1,
                    message: e.to_string(),
                };
                warn!("skipping malformed capture record: {err}");
                skipped += 1;
            }
        }
    }

    debug!(
        records = log.len(),
        skipped,
        path = %path.display(),
        "capture loaded"
    );
    Ok(log)
}
