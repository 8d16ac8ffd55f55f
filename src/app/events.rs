//! Outbound application events.
//!
//! The dispatcher and snapshot writer emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide whether to log, beep or update the status line.

use crate::error::SnapshotError;

use super::ports::SettingsError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A code with no handler in this build was received.
    UnknownCommand(u16),

    /// A setter changed at least one field of its group.
    SettingsChanged { code: u16 },

    /// A configuration script announced itself (`C10`).
    ConfigScriptStarted,

    /// `config.gcode` was written and closed.
    SnapshotStored { bytes: usize },

    /// Writing `config.gcode` failed; no success signal was given.
    SnapshotFailed(SnapshotError),

    /// Settings were restored to compile-time defaults.
    SettingsReset,

    /// Settings were handed to the persistence collaborator.
    SettingsSaved,

    /// Settings were loaded from the persistence collaborator.
    SettingsLoaded,

    /// The persistence collaborator failed.
    SettingsFailed(SettingsError),
}
