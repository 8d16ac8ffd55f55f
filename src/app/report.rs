//! Report formatter — canonical text for each settings group.
//!
//! One line per group, in two flavours:
//!
//! ```text
//! interactive:  echo:; Physical Minimums:
//!               echo:  C100 X0 Y0
//! replay:         C100 X0 Y0
//! ```
//!
//! The replay form is valid input to the dispatcher, so concatenating every
//! group reproduces the current state when fed back in.  Output depends only
//! on the context, byte for byte.

use core::fmt::Write;

use crate::capabilities::{Capabilities, Feature};
use crate::config::{GeometryOverrides, ParkPosition};
use crate::units::UnitSystem;

use super::context::MachineContext;

/// Prefix the serial layer puts in front of echoed lines.
pub const ECHO_PREFIX: &str = "echo:";

/// A group of settings with its own `C` code and report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportGroup {
    PhysicalMinimums,
    PhysicalMaximums,
    BedSize,
    ParkPosition,
    LaserMode,
}

impl ReportGroup {
    /// Report order.
    pub const ALL: [ReportGroup; 5] = [
        Self::PhysicalMinimums,
        Self::PhysicalMaximums,
        Self::BedSize,
        Self::ParkPosition,
        Self::LaserMode,
    ];

    pub const fn code(self) -> u16 {
        match self {
            Self::PhysicalMinimums => 100,
            Self::PhysicalMaximums => 101,
            Self::BedSize => 102,
            Self::ParkPosition => 125,
            Self::LaserMode => 3,
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Self::PhysicalMinimums => "Physical Minimums",
            Self::PhysicalMaximums => "Physical Maximums",
            Self::BedSize => "Bed Size",
            Self::ParkPosition => "Nozzle Park Position",
            Self::LaserMode => "Laser/Fan Configuration",
        }
    }

    pub const fn is_geometry(self) -> bool {
        matches!(
            self,
            Self::PhysicalMinimums | Self::PhysicalMaximums | Self::BedSize
        )
    }

    /// Whether this build has a report line for the group at all.
    pub const fn available(self, caps: Capabilities) -> bool {
        if !caps.has(Feature::CustomCommands) {
            return false;
        }
        match self {
            Self::PhysicalMinimums | Self::PhysicalMaximums | Self::BedSize => true,
            Self::ParkPosition => caps.has(Feature::NozzlePark),
            Self::LaserMode => caps.has(Feature::Laser),
        }
    }

    /// Whether the group has a setter, i.e. its replay line means something.
    pub const fn settable(self, caps: Capabilities) -> bool {
        self.available(caps) && (!self.is_geometry() || caps.has(Feature::GeometryOverrides))
    }
}

/// Geometry as reported: the live overrides, or the compile-time defaults
/// when the override store is compiled out.
pub fn reported_geometry(ctx: &MachineContext) -> GeometryOverrides {
    if ctx.capabilities().has(Feature::GeometryOverrides) {
        ctx.geometry
    } else {
        GeometryOverrides::default()
    }
}

/// Full report text for `group`, or `None` if the build lacks it.
pub fn format_group(group: ReportGroup, ctx: &MachineContext, for_replay: bool) -> Option<String> {
    if !group.available(ctx.capabilities()) {
        return None;
    }
    let mut out = String::new();
    if !for_replay {
        let _ = writeln!(out, "{ECHO_PREFIX}; {}:", group.heading());
        out.push_str(ECHO_PREFIX);
    }
    out.push_str(&command_line(group, ctx));
    out.push('\n');
    Some(out)
}

/// Every available group, in report order.
pub fn report_all(ctx: &MachineContext, for_replay: bool) -> String {
    ReportGroup::ALL
        .into_iter()
        .filter_map(|g| format_group(g, ctx, for_replay))
        .collect()
}

/// The bare command line for `group`, e.g. `"  C102 X230 Y230"`.
pub fn command_line(group: ReportGroup, ctx: &MachineContext) -> String {
    let units = ctx.units;
    let mut line = String::new();
    let _ = write!(line, "  C{}", group.code());
    match group {
        ReportGroup::PhysicalMinimums => {
            let g = reported_geometry(ctx);
            push_length(&mut line, 'X', f32::from(g.x_min_pos), units);
            push_length(&mut line, 'Y', f32::from(g.y_min_pos), units);
        }
        ReportGroup::PhysicalMaximums => {
            let g = reported_geometry(ctx);
            push_length(&mut line, 'X', f32::from(g.x_max_pos), units);
            push_length(&mut line, 'Y', f32::from(g.y_max_pos), units);
            push_length(&mut line, 'Z', f32::from(g.z_max_pos), units);
        }
        ReportGroup::BedSize => {
            let g = reported_geometry(ctx);
            push_length(&mut line, 'X', f32::from(g.x_bed_size), units);
            push_length(&mut line, 'Y', f32::from(g.y_bed_size), units);
        }
        ReportGroup::ParkPosition => {
            let p = ctx.park;
            for (letter, mm) in [('X', p.x), ('Y', p.y), ('Z', p.z)] {
                push_park(&mut line, letter, mm, units);
            }
        }
        ReportGroup::LaserMode => {
            let l = ctx.laser;
            let _ = write!(line, " O{} H{}", l.off_power, l.target_height);
            if l.laser_mode {
                line.push_str(" L ; Laser Mode enabled");
            } else {
                line.push_str(" F ; Fan Mode enabled");
            }
        }
    }
    line
}

/// Whole millimetres print as integers; in inches four decimals keep the
/// value exact to well under half a millimetre on replay.
fn push_length(line: &mut String, letter: char, mm: f32, units: UnitSystem) {
    match units {
        UnitSystem::Millimeters => {
            let _ = write!(line, " {letter}{}", mm.round() as i32);
        }
        UnitSystem::Inches => {
            let _ = write!(line, " {letter}{:.4}", units.from_mm(mm));
        }
    }
}

/// Park values print in shortest form in millimetres.  In inches five
/// decimals put replay within a fraction of the 0.001 mm park grid.
fn push_park(line: &mut String, letter: char, mm: f32, units: UnitSystem) {
    let mm = ParkPosition::snap(mm);
    match units {
        UnitSystem::Millimeters => {
            let _ = write!(line, " {letter}{mm}");
        }
        UnitSystem::Inches => {
            let _ = write!(line, " {letter}{:.5}", units.from_mm(mm));
        }
    }
}
