//! Configuration snapshot — the whole machine configuration as a
//! replayable command script.
//!
//! The script is assembled in memory, then handed to storage in a single
//! write followed by close.  Nothing reaches the file until the buffer is
//! complete, and the success signal is raised only once close returns.
//!
//! ```text
//!  header · M502 · units · M92 · M203 · M201 · M204 · M205 · M206
//!         · [M666] · M851 · [M906] · [C100 C101 C102 C125 C3]
//!         · M500 · G4 · M300 · M117
//! ```

use core::fmt::Write;

use log::{info, warn};

use crate::capabilities::{Capabilities, Feature};
use crate::error::SnapshotError;
use crate::units::UnitSystem;

use super::context::MachineContext;
use super::events::AppEvent;
use super::ports::{Axis, EventSink, FileStore, MotionPort, Stepper, StepperPort};
use super::report::{ReportGroup, command_line};

/// Fixed name of the snapshot on the storage card.
pub const SNAPSHOT_FILE: &str = "config.gcode";

/// Directive restoring firmware defaults; always precedes parameter lines.
pub const RESET_DIRECTIVE: &str = "M502";

const HEADER: &str = ";  Firmware Configuration File\n\
;=====================================================\n";
const CONFIG_MARKER: &str = "C10\n";
const APPLYING: &str = "M117 Applying configuration\n\
;-----------------------------------------------------\n";
const FOOTER: &str = "M500\nG4S1\nM300P200\nM117 Configuration Applied\n";

pub struct ConfigSnapshotSerializer {
    file_name: &'static str,
}

impl Default for ConfigSnapshotSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSnapshotSerializer {
    pub fn new() -> Self {
        Self {
            file_name: SNAPSHOT_FILE,
        }
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Build, write and close the snapshot.  Returns the bytes written.
    ///
    /// Exactly one of `SnapshotStored` / `SnapshotFailed` is emitted.
    pub fn write_snapshot(
        &self,
        ctx: &MachineContext,
        hw: &(impl MotionPort + StepperPort),
        files: &mut impl FileStore,
        sink: &mut impl EventSink,
    ) -> Result<usize, SnapshotError> {
        let script = self.build(ctx, hw);
        match self.store(files, script.as_bytes()) {
            Ok(bytes) => {
                info!("Config snapshot stored: {} ({} bytes)", self.file_name, bytes);
                sink.emit(&AppEvent::SnapshotStored { bytes });
                Ok(bytes)
            }
            Err(e) => {
                warn!("Config snapshot failed: {}", e);
                sink.emit(&AppEvent::SnapshotFailed(e));
                Err(e)
            }
        }
    }

    /// Assemble the script text without touching storage.
    pub fn build(&self, ctx: &MachineContext, hw: &(impl MotionPort + StepperPort)) -> String {
        let caps = ctx.capabilities();
        let units = if caps.has(Feature::InchMode) {
            ctx.units
        } else {
            UnitSystem::Millimeters
        };
        let mut out = String::with_capacity(1024);

        out.push_str(HEADER);
        if caps.has(Feature::CustomCommands) {
            out.push_str(CONFIG_MARKER);
        }
        out.push_str(APPLYING);
        out.push_str(RESET_DIRECTIVE);
        out.push('\n');

        let _ = writeln!(out, "  {} ; ({})", units.gcode(), units.suffix());
        write_motion(&mut out, caps, units, hw);
        write_steppers(&mut out, caps, hw);
        write_custom_groups(&mut out, ctx, units);

        out.push_str(FOOTER);
        out
    }

    fn store(&self, files: &mut impl FileStore, data: &[u8]) -> Result<usize, SnapshotError> {
        files.open_write(self.file_name).map_err(SnapshotError::Open)?;

        let written = match files.write(data) {
            Ok(n) => n,
            Err(e) => {
                let _ = files.close();
                return Err(SnapshotError::Write(e));
            }
        };
        if written != data.len() {
            let _ = files.close();
            return Err(SnapshotError::ShortWrite {
                written,
                expected: data.len(),
            });
        }

        files.close().map_err(SnapshotError::Close)?;
        Ok(written)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Line groups
// ═══════════════════════════════════════════════════════════════════════════

/// Planner, offsets and endstop trim.
///
/// Lengths, speeds and accelerations are divided by the unit factor; steps
/// per unit are multiplied, so each line replays correctly under the unit
/// directive emitted above it.
fn write_motion(out: &mut String, caps: Capabilities, units: UnitSystem, hw: &impl MotionPort) {
    let p = hw.planner();
    let lin = |v: f32| units.from_mm(v);
    let per_unit = |v: f32| v * units.linear_unit_factor();

    axis_line(out, "M92", p.steps_per_unit.map(per_unit));
    axis_line(out, "M203", p.max_feedrate.map(lin));
    axis_line(out, "M201", p.max_acceleration.map(lin));

    let _ = writeln!(
        out,
        "  M204 P{:.2} R{:.2} T{:.2}",
        lin(p.acceleration),
        lin(p.retract_acceleration),
        lin(p.travel_acceleration)
    );

    let _ = write!(
        out,
        "  M205 B{} S{:.2} T{:.2}",
        p.min_segment_time_us,
        lin(p.min_feedrate),
        lin(p.min_travel_feedrate)
    );
    if caps.has(Feature::ClassicJerk) {
        let [x, y, z] = p.max_jerk.map(lin);
        let _ = write!(out, " X{x:.2} Y{y:.2} Z{z:.2}");
    }
    out.push('\n');

    axis_line(out, "M206", hw.home_offset().map(lin));

    if caps.has_extra_endstops() {
        out.push_str("  M666");
        let trims = [
            (Feature::DualEndstopsX, Axis::X, 'X'),
            (Feature::DualEndstopsY, Axis::Y, 'Y'),
            (Feature::MultiEndstopsZ, Axis::Z, 'Z'),
        ];
        for (feature, axis, letter) in trims {
            if caps.has(feature) {
                let _ = write!(out, " {letter}{:.2}", lin(hw.endstop_adjustment(axis)));
            }
        }
        out.push('\n');
    }

    axis_line(out, "M851", hw.probe_offset().map(lin));
}

/// `M906` driver currents: primaries on one line, secondaries under `I1`.
fn write_steppers(out: &mut String, caps: Capabilities, hw: &impl StepperPort) {
    if !caps.has(Feature::TrinamicConfig) {
        return;
    }
    for (steppers, index) in [(Stepper::PRIMARY, ""), (Stepper::SECONDARY, " I1")] {
        let mut line = String::new();
        for stepper in steppers {
            if let Some(ma) = hw.current_ma(stepper) {
                let _ = write!(line, " {}{}", stepper.letter(), ma);
            }
        }
        if !line.is_empty() {
            let _ = writeln!(out, "  M906{index}{line}");
        }
    }
}

/// Replay lines of every settable `C` group.
fn write_custom_groups(out: &mut String, ctx: &MachineContext, units: UnitSystem) {
    let caps = ctx.capabilities();
    let mut view = ctx.clone();
    view.units = units;
    for group in ReportGroup::ALL {
        if group.settable(caps) {
            out.push_str(&command_line(group, &view));
            out.push('\n');
        }
    }
}

fn axis_line(out: &mut String, code: &str, [x, y, z]: [f32; 3]) {
    let _ = writeln!(out, "  {code} X{x:.2} Y{y:.2} Z{z:.2}");
}
