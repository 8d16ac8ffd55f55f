//! Machine geometry configuration.
//!
//! Compile-time defaults for the axis travel limits and bed size, and the
//! runtime override record seeded from them.  The override record is what
//! the `C100`/`C101`/`C102` commands mutate and what the settings
//! collaborator persists.

use serde::{Deserialize, Serialize};

// --- Compile-time defaults (millimetres) ---
pub const DEF_X_BED_SIZE: u16 = 230;
pub const DEF_Y_BED_SIZE: u16 = 230;
pub const DEF_X_MIN_POS: i16 = 0;
pub const DEF_Y_MIN_POS: i16 = 0;
pub const DEF_X_MAX_POS: i16 = 248;
pub const DEF_Y_MAX_POS: i16 = 231;
pub const DEF_Z_MAX_POS: i16 = 250;

/// Default nozzle park point (X, Y, Z).
pub const DEF_PARK_POINT: [f32; 3] = [10.0, 10.0, 20.0];

/// Park coordinates are held on a 0.001 mm grid.
pub const PARK_STEPS_PER_MM: f32 = 1000.0;

/// Runtime-mutable copy of the machine geometry.
///
/// Field order is part of the persisted layout: bed size first, then the
/// minimum and maximum bounds.  Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryOverrides {
    pub x_bed_size: u16,
    pub y_bed_size: u16,
    pub x_min_pos: i16,
    pub y_min_pos: i16,
    pub x_max_pos: i16,
    pub y_max_pos: i16,
    pub z_max_pos: i16,
}

impl Default for GeometryOverrides {
    fn default() -> Self {
        Self {
            x_bed_size: DEF_X_BED_SIZE,
            y_bed_size: DEF_Y_BED_SIZE,
            x_min_pos: DEF_X_MIN_POS,
            y_min_pos: DEF_Y_MIN_POS,
            x_max_pos: DEF_X_MAX_POS,
            y_max_pos: DEF_Y_MAX_POS,
            z_max_pos: DEF_Z_MAX_POS,
        }
    }
}

impl GeometryOverrides {
    /// Axes whose minimum is not strictly below their maximum.
    ///
    /// Inverted bounds are accepted by the store; this only feeds warnings.
    pub fn inverted_axes(&self) -> heapless::Vec<char, 2> {
        let mut axes = heapless::Vec::new();
        if self.x_min_pos >= self.x_max_pos {
            let _ = axes.push('X');
        }
        if self.y_min_pos >= self.y_max_pos {
            let _ = axes.push('Y');
        }
        axes
    }
}

/// Nozzle park point used by pause/park moves (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParkPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for ParkPosition {
    fn default() -> Self {
        let [x, y, z] = DEF_PARK_POINT;
        Self { x, y, z }
    }
}

impl ParkPosition {
    /// Snap a millimetre value onto the park grid.  Idempotent, so a value
    /// that went through a report and back lands on the same `f32`.
    pub fn snap(mm: f32) -> f32 {
        (mm * PARK_STEPS_PER_MM).round() / PARK_STEPS_PER_MM
    }
}

/// Laser/fan output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaserSettings {
    /// `true`: G3-5 enabled and power changes sync with movement.
    /// `false`: fan mode, power changes apply immediately.
    pub laser_mode: bool,
    /// Power kept during travel moves (0 = off).
    pub off_power: u8,
    /// Target focus height.
    pub target_height: u8,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            laser_mode: true,
            off_power: 0,
            target_height: 0,
        }
    }
}

/// Everything this extension hands to the bulk settings collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub geometry: GeometryOverrides,
    pub park: ParkPosition,
    pub laser: LaserSettings,
}
