//! `C` command handlers and route-table builder.
//!
//! Each handler is a plain `fn` pointer: read the optional argument words,
//! overwrite the matching fields (merge, never replace), then echo the
//! group's report line so a bare invocation doubles as a getter.
//!
//! ```text
//!  C10   mark configuration script      CustomCommands
//!  C100  X Y      physical minimums     GeometryOverrides
//!  C101  X Y Z    physical maximums     GeometryOverrides
//!  C102  X Y      bed size              GeometryOverrides
//!  C125  X Y Z    nozzle park point     NozzlePark
//!  C3    L|F O H  laser / fan mode      Laser
//! ```

use log::{debug, info, warn};

use crate::capabilities::{Capabilities, Feature};
use crate::config::{GeometryOverrides, ParkPosition};

use super::commands::CommandArgs;
use super::context::MachineContext;
use super::events::AppEvent;
use super::ports::EchoSink;
use super::report::{ReportGroup, format_group};

/// Upper bound on routes; sized for every feature enabled.
pub const MAX_ROUTES: usize = 8;

/// Handler signature.  Returns the event to raise, if any.
pub type CommandHandler =
    fn(&mut MachineContext, &CommandArgs, &mut dyn EchoSink) -> Option<AppEvent>;

/// One row of the route table.
#[derive(Clone, Copy)]
pub struct Route {
    pub code: u16,
    pub name: &'static str,
    pub handler: CommandHandler,
}

pub type RouteTable = heapless::Vec<Route, MAX_ROUTES>;

const fn route(code: u16, name: &'static str, handler: CommandHandler) -> Route {
    Route {
        code,
        name,
        handler,
    }
}

/// Build the route table for `caps`.  Called once at startup.
///
/// A code whose feature is missing gets no row at all.
pub fn build_route_table(caps: Capabilities) -> RouteTable {
    let mut table = RouteTable::new();
    if !caps.has(Feature::CustomCommands) {
        return table;
    }

    let geometry = caps.has(Feature::GeometryOverrides);
    let rows = [
        (true, route(10, "Mark configuration script", config_script_marker)),
        (geometry, route(100, "Physical minimums", physical_minimums)),
        (geometry, route(101, "Physical maximums", physical_maximums)),
        (geometry, route(102, "Bed size", bed_size)),
        (
            caps.has(Feature::NozzlePark),
            route(125, "Park position", park_position),
        ),
        (caps.has(Feature::Laser), route(3, "Laser/fan mode", laser_mode)),
    ];

    for (enabled, route) in rows {
        if enabled {
            // Capacity covers every row above.
            let _ = table.push(route);
        }
    }
    debug!("Route table built: {} codes for [{}]", table.len(), caps);
    table
}

// ═══════════════════════════════════════════════════════════════════════════
//  Handlers
// ═══════════════════════════════════════════════════════════════════════════

fn config_script_marker(
    _ctx: &mut MachineContext,
    _args: &CommandArgs,
    _echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    info!("Configuration script started");
    Some(AppEvent::ConfigScriptStarted)
}

fn physical_minimums(
    ctx: &mut MachineContext,
    args: &CommandArgs,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    let units = ctx.units;
    let g = &mut ctx.geometry;
    let mut changed = false;
    if let Some(mm) = args.value_axis('X', units) {
        changed |= set_bound(&mut g.x_min_pos, mm);
    }
    if let Some(mm) = args.value_axis('Y', units) {
        changed |= set_bound(&mut g.y_min_pos, mm);
    }
    finish(ReportGroup::PhysicalMinimums, changed, ctx, echo)
}

fn physical_maximums(
    ctx: &mut MachineContext,
    args: &CommandArgs,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    let units = ctx.units;
    let g = &mut ctx.geometry;
    let mut changed = false;
    if let Some(mm) = args.value_axis('X', units) {
        changed |= set_bound(&mut g.x_max_pos, mm);
    }
    if let Some(mm) = args.value_axis('Y', units) {
        changed |= set_bound(&mut g.y_max_pos, mm);
    }
    if let Some(mm) = args.value_axis('Z', units) {
        changed |= set_bound(&mut g.z_max_pos, mm);
    }
    finish(ReportGroup::PhysicalMaximums, changed, ctx, echo)
}

fn bed_size(
    ctx: &mut MachineContext,
    args: &CommandArgs,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    let units = ctx.units;
    let g = &mut ctx.geometry;
    let mut changed = false;
    if let Some(mm) = args.value_axis('X', units) {
        changed |= set_size(&mut g.x_bed_size, mm);
    }
    if let Some(mm) = args.value_axis('Y', units) {
        changed |= set_size(&mut g.y_bed_size, mm);
    }
    finish(ReportGroup::BedSize, changed, ctx, echo)
}

fn park_position(
    ctx: &mut MachineContext,
    args: &CommandArgs,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    let units = ctx.units;
    let p = &mut ctx.park;
    let mut changed = false;
    for (letter, field) in [('X', &mut p.x), ('Y', &mut p.y), ('Z', &mut p.z)] {
        if let Some(mm) = args.value_axis(letter, units) {
            let value = ParkPosition::snap(mm);
            changed |= field.to_bits() != value.to_bits();
            *field = value;
        }
    }
    finish(ReportGroup::ParkPosition, changed, ctx, echo)
}

/// `F` (fan mode) wins when both `F` and `L` are given.
fn laser_mode(
    ctx: &mut MachineContext,
    args: &CommandArgs,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    let before = ctx.laser;
    let l = &mut ctx.laser;
    if args.seen('F') {
        l.laser_mode = false;
    } else if args.seen('L') {
        l.laser_mode = true;
    }
    if let Some(power) = args.value_byte('O') {
        l.off_power = power;
    }
    if let Some(height) = args.value_byte('H') {
        l.target_height = height;
    }
    let changed = ctx.laser != before;
    finish(ReportGroup::LaserMode, changed, ctx, echo)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Store a bound in whole millimetres.  `as` saturates at the i16 range.
fn set_bound(field: &mut i16, mm: f32) -> bool {
    let value = mm.round() as i16;
    let changed = *field != value;
    *field = value;
    changed
}

/// Store a bed dimension in whole millimetres; negatives saturate to zero.
fn set_size(field: &mut u16, mm: f32) -> bool {
    if mm < 0.0 {
        warn!("Negative bed size {mm} clamped to 0");
    }
    let value = mm.round() as u16;
    let changed = *field != value;
    *field = value;
    changed
}

fn warn_if_inverted(g: &GeometryOverrides) {
    for axis in g.inverted_axes() {
        warn!("{axis} minimum is not below its maximum; accepted as given");
    }
}

fn finish(
    group: ReportGroup,
    changed: bool,
    ctx: &MachineContext,
    echo: &mut dyn EchoSink,
) -> Option<AppEvent> {
    if group.is_geometry() && changed {
        warn_if_inverted(&ctx.geometry);
    }
    if let Some(text) = format_group(group, ctx, true) {
        echo.echo(&text);
    }
    changed.then_some(AppEvent::SettingsChanged { code: group.code() })
}
