//! Directory-backed file store.
//!
//! Implements [`FileStore`] on the host filesystem, standing in for the
//! SD card.  Files are created (truncated) under a fixed root directory.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use log::{debug, warn};

use crate::app::ports::{FileError, FileStore};

pub struct DirFileStore {
    root: PathBuf,
    open: Option<File>,
}

impl DirFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            open: None,
        }
    }
}

impl FileStore for DirFileStore {
    fn open_write(&mut self, name: &str) -> Result<(), FileError> {
        if !self.root.is_dir() {
            warn!("DirFileStore: {} is not a directory", self.root.display());
            return Err(FileError::NoMedia);
        }
        let path = self.root.join(name);
        let file = File::create(&path).map_err(|e| {
            warn!("DirFileStore: create {} failed: {}", path.display(), e);
            FileError::OpenFailed
        })?;
        debug!("DirFileStore: opened {}", path.display());
        self.open = Some(file);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, FileError> {
        let file = self.open.as_mut().ok_or(FileError::NotOpen)?;
        file.write_all(data).map_err(|e| match e.kind() {
            ErrorKind::StorageFull => FileError::DeviceFull,
            _ => FileError::WriteFailed,
        })?;
        Ok(data.len())
    }

    fn close(&mut self) -> Result<(), FileError> {
        let file = self.open.take().ok_or(FileError::NotOpen)?;
        file.sync_all().map_err(|_| FileError::CloseFailed)
    }
}
