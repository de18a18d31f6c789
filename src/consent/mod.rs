//! Consent persistence for the one-time payload notice.
//!
//! Before captured payload bytes are revealed for the first time, the user
//! must acknowledge a warning about sensitive data. That acknowledgement is
//! a single process-wide boolean, persisted across view instances and
//! process restarts. [`ConsentStore`] is the seam; [`PrefsFile`] is the
//! production TOML-backed store, [`MemoryConsentStore`] the test double.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;

/// Shared handle to the process-wide consent store.
///
/// All controller instances read the same store; it is written at most once
/// per user decision (on Accept), so plain single-threaded interior
/// mutability is sufficient.
pub type SharedConsentStore = Rc<RefCell<dyn ConsentStore>>;

/// Persisted "payload notice acknowledged" flag.
///
/// Monotonic: once acknowledged, the flag never reverts through normal use.
pub trait ConsentStore {
    /// Whether the payload notice has ever been acknowledged.
    fn is_acknowledged(&self) -> bool;

    /// Record the acknowledgement, persisting it where the store supports
    /// persistence. Persistence failures are logged, not surfaced: the
    /// in-process flag is still set so the current session stays revealed.
    fn set_acknowledged(&mut self);
}

/// Errors loading the preferences file.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// No user configuration directory could be determined.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    /// The preferences file exists but is not valid TOML for the schema.
    #[error("invalid preferences file at {path}: {reason}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// I/O failure reading the preferences file.
    #[error("failed to read preferences at {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// On-disk schema of `prefs.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsData {
    /// The one-time payload notice acknowledgement.
    #[serde(default)]
    payload_notice_ack: bool,
}

/// TOML-backed consent store at `<config dir>/hplv/prefs.toml`.
///
/// A missing file means nothing has been acknowledged yet. Writes rewrite
/// the whole file; there is only one key.
#[derive(Debug)]
pub struct PrefsFile {
    path: PathBuf,
    data: PrefsData,
}

impl PrefsFile {
    /// Load preferences from the default per-user location.
    pub fn load_default() -> Result<Self, PrefsError> {
        let dir = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Self::load_from(dir.join("hplv").join("prefs.toml"))
    }

    /// Load preferences from an explicit path (missing file is fine).
    pub fn load_from(path: PathBuf) -> Result<Self, PrefsError> {
        let data = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| PrefsError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PrefsData::default(),
            Err(source) => {
                return Err(PrefsError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        Ok(Self { path, data })
    }

    /// Path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // PrefsData is a flat struct of primitives; serialization cannot fail.
        let contents = toml::to_string(&self.data).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, contents)
    }
}

impl ConsentStore for PrefsFile {
    fn is_acknowledged(&self) -> bool {
        self.data.payload_notice_ack
    }

    fn set_acknowledged(&mut self) {
        self.data.payload_notice_ack = true;
        if let Err(e) = self.persist() {
            warn!("failed to persist payload notice acknowledgement: {e}");
        }
    }
}

/// In-memory consent store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryConsentStore {
    acknowledged: bool,
}

impl MemoryConsentStore {
    /// New store with nothing acknowledged.
    pub fn new() -> Self {
        Self::default()
    }

    /// New store that starts already acknowledged.
    pub fn acknowledged() -> Self {
        Self { acknowledged: true }
    }

    /// Wrap a store in the shared handle used by controllers.
    pub fn shared(self) -> SharedConsentStore {
        Rc::new(RefCell::new(self))
    }
}

impl ConsentStore for MemoryConsentStore {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    fn set_acknowledged(&mut self) {
        self.acknowledged = true;
    }
}
