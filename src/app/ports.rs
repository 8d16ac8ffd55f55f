//! Port traits — the boundary between the command extension and the rest
//! of the firmware.
//!
//! ```text
//!   Collaborator ──▶ Port trait ──▶ dispatcher / snapshot writer
//! ```
//!
//! The motion planner, stepper drivers, storage card, settings layer and
//! presentation layer are all external.  Adapters implement these traits;
//! the core consumes them through generics or `dyn` references, so nothing
//! here touches hardware directly.

use crate::config::PersistedSettings;

// ───────────────────────────────────────────────────────────────
// Serial echo (domain → operator)
// ───────────────────────────────────────────────────────────────

/// Synchronous text output to the host serial console.
///
/// `text` is one or more complete lines, each terminated by `\n`.
pub trait EchoSink {
    fn echo(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → status line / buzzer / logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s here.
/// The presentation adapter decides whether to beep, update the status
/// line, or just log.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Motion data (planner + stepper collaborators → snapshot)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A stepper driver; `X2`/`Y2`/`Z2` are the secondary motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stepper {
    X,
    Y,
    Z,
    X2,
    Y2,
    Z2,
}

impl Stepper {
    pub const PRIMARY: [Stepper; 3] = [Self::X, Self::Y, Self::Z];
    pub const SECONDARY: [Stepper; 3] = [Self::X2, Self::Y2, Self::Z2];

    /// Axis letter used in `M906`.
    pub const fn letter(self) -> char {
        match self {
            Self::X | Self::X2 => 'X',
            Self::Y | Self::Y2 => 'Y',
            Self::Z | Self::Z2 => 'Z',
        }
    }
}

/// Live planner settings, in millimetre-based units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerSettings {
    /// Steps per mm, XYZ.
    pub steps_per_unit: [f32; 3],
    /// mm/s, XYZ.
    pub max_feedrate: [f32; 3],
    /// mm/s², XYZ.
    pub max_acceleration: [f32; 3],
    /// Print acceleration, mm/s².
    pub acceleration: f32,
    pub retract_acceleration: f32,
    pub travel_acceleration: f32,
    pub min_segment_time_us: u32,
    /// mm/s
    pub min_feedrate: f32,
    pub min_travel_feedrate: f32,
    /// mm/s, XYZ.  Only meaningful with classic jerk.
    pub max_jerk: [f32; 3],
}

/// Read-side port onto the motion subsystems.
pub trait MotionPort {
    fn planner(&self) -> PlannerSettings;

    /// `M206` home offset, XYZ (mm).
    fn home_offset(&self) -> [f32; 3];

    /// `M851` probe offset, XYZ (mm).
    fn probe_offset(&self) -> [f32; 3];

    /// Trim of the secondary endstop on `axis` (mm).
    fn endstop_adjustment(&self, axis: Axis) -> f32;
}

/// Read-side port onto the stepper drivers.
pub trait StepperPort {
    /// Run current in mA, or `None` if this motor has no software-controlled
    /// driver (or is not fitted).
    fn current_ma(&self, stepper: Stepper) -> Option<u16>;
}

// ───────────────────────────────────────────────────────────────
// File storage (domain → SD card / flash filesystem)
// ───────────────────────────────────────────────────────────────

/// Minimal create/write/close surface of the storage layer.
pub trait FileStore {
    /// Create `name`, truncating any previous content.
    fn open_write(&mut self, name: &str) -> Result<(), FileError>;

    /// Write to the open file.  Returns the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, FileError>;

    /// Flush and close the open file.
    fn close(&mut self) -> Result<(), FileError>;
}

// ───────────────────────────────────────────────────────────────
// Persistent settings (domain ↔ EEPROM / NVS)
// ───────────────────────────────────────────────────────────────

/// Bulk save/restore of the settings this extension owns.
pub trait SettingsPort {
    /// Returns [`PersistedSettings::default()`] if nothing is stored yet.
    fn load(&self) -> Result<PersistedSettings, SettingsError>;

    fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`FileStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    /// No card inserted / filesystem not mounted.
    NoMedia,
    OpenFailed,
    WriteFailed,
    DeviceFull,
    CloseFailed,
    /// `write`/`close` called with no open file.
    NotOpen,
}

/// Errors from [`SettingsPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// Stored blob failed to deserialize.
    Corrupted,
    /// Storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for FileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoMedia => write!(f, "no media"),
            Self::OpenFailed => write!(f, "open failed"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::DeviceFull => write!(f, "device full"),
            Self::CloseFailed => write!(f, "close failed"),
            Self::NotOpen => write!(f, "no open file"),
        }
    }
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "settings corrupted"),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
