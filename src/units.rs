//! Linear unit system (`G20`/`G21`).
//!
//! Values are stored in millimetres.  Command arguments and report output
//! use whatever unit is active.

const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Millimeters,
    Inches,
}

impl UnitSystem {
    /// Millimetres per active unit.
    pub const fn linear_unit_factor(self) -> f32 {
        match self {
            Self::Millimeters => 1.0,
            Self::Inches => MM_PER_INCH,
        }
    }

    /// Convert an argument in the active unit to millimetres.
    pub fn to_mm(self, value: f32) -> f32 {
        value * self.linear_unit_factor()
    }

    /// Convert a stored millimetre value to the active unit.
    pub fn from_mm(self, mm: f32) -> f32 {
        mm / self.linear_unit_factor()
    }

    /// `G20` or `G21`.
    pub const fn gcode(self) -> &'static str {
        match self {
            Self::Millimeters => "G21",
            Self::Inches => "G20",
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }
}
