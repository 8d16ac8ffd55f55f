//! Unified error types for the command extension.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! command loop's error handling uniform.  All variants are `Copy` so they
//! can travel through events and the status channel without allocation.

use core::fmt;

use crate::app::ports::{FileError, SettingsError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No handler is registered for this `C` code in the current build.
    UnknownCommand(u16),
    /// Writing the configuration snapshot failed.
    Snapshot(SnapshotError),
    /// The persistent-settings collaborator failed.
    Settings(SettingsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(code) => write!(f, "unknown command C{code}"),
            Self::Snapshot(e) => write!(f, "snapshot: {e}"),
            Self::Settings(e) => write!(f, "settings: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Snapshot errors
// ---------------------------------------------------------------------------

/// Stage at which writing `config.gcode` failed, with the storage cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// The target file could not be created or truncated.
    Open(FileError),
    /// The single block write was rejected.
    Write(FileError),
    /// The device accepted fewer bytes than the assembled buffer.
    ShortWrite { written: usize, expected: usize },
    /// The file could not be closed (data may not be flushed).
    Close(FileError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(e) => write!(f, "open failed ({e})"),
            Self::Write(e) => write!(f, "write failed ({e})"),
            Self::ShortWrite { written, expected } => {
                write!(f, "short write: {written} of {expected} bytes")
            }
            Self::Close(e) => write!(f, "close failed ({e})"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<SnapshotError> for Error {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

impl From<SettingsError> for Error {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
