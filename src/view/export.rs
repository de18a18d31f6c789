//! Host-side export capability.
//!
//! Writes the currently displayed payload to a file. The payload view only
//! manages this handler's attach/detach lifecycle; everything about where
//! and how bytes land lives here, on the host side of the seam.

use crate::state::ExportPayloadHandler;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Exports payloads as `payload.bin` / `payload-N.bin` files in a target
/// directory, never overwriting an existing export.
#[derive(Debug)]
pub struct FileExportHandler {
    dir: PathBuf,
}

impl FileExportHandler {
    /// Handler writing into `dir` (created on first export).
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn next_free_path(&self) -> PathBuf {
        let first = self.dir.join("payload.bin");
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| self.dir.join(format!("payload-{n}.bin")))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

impl ExportPayloadHandler for FileExportHandler {
    fn export_payload(&self, payload: &[u8]) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.next_free_path();
        std::fs::write(&path, payload)?;
        info!(bytes = payload.len(), path = %path.display(), "payload exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_export_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hplv_export_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn export_writes_payload_bytes() {
        let dir = temp_export_dir("write");
        let handler = FileExportHandler::new(dir.clone());

        let path = handler.export_payload(b"some body").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"some body");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn repeated_exports_get_distinct_names() {
        let dir = temp_export_dir("distinct");
        let handler = FileExportHandler::new(dir.clone());

        let first = handler.export_payload(b"a").unwrap();
        let second = handler.export_payload(b"b").unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"a");
        assert_eq!(std::fs::read(&second).unwrap(), b"b");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
