//! Integration tests for the dispatcher → handler → report pipeline.

use super::mock_hw::{EchoLog, EventLog};

use cncconf::app::commands::CommandArgs;
use cncconf::app::context::MachineContext;
use cncconf::app::dispatcher::CommandDispatcher;
use cncconf::app::events::AppEvent;
use cncconf::capabilities::{Capabilities, Feature};
use cncconf::config::GeometryOverrides;
use cncconf::error::Error;
use cncconf::units::UnitSystem;

fn make(caps: Capabilities) -> (CommandDispatcher, MachineContext, EchoLog, EventLog) {
    (
        CommandDispatcher::new(caps),
        MachineContext::new(caps),
        EchoLog::new(),
        EventLog::new(),
    )
}

// ── Getters and setters ───────────────────────────────────────

#[test]
fn bed_size_getter_on_defaults() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::default_build());

    d.dispatch(102, &CommandArgs::new(), &mut ctx, &mut echo, &mut events)
        .unwrap();

    assert_eq!(echo.text, "  C102 X230 Y230\n");
    assert!(events.events.is_empty(), "getter must not report a change");
    assert_eq!(ctx.geometry, GeometryOverrides::default());
}

#[test]
fn z_only_maximums_keep_x_and_y() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::default_build());
    let args = CommandArgs::new().with('Z', 180.0);

    d.dispatch(101, &args, &mut ctx, &mut echo, &mut events).unwrap();

    assert_eq!(ctx.geometry.z_max_pos, 180);
    assert_eq!(ctx.geometry.x_max_pos, 248);
    assert_eq!(ctx.geometry.y_max_pos, 231);
    assert_eq!(echo.text, "  C101 X248 Y231 Z180\n");
    assert_eq!(events.events, vec![AppEvent::SettingsChanged { code: 101 }]);
}

#[test]
fn bare_setter_is_idempotent() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::all());
    let before = ctx.persisted();

    for code in [100, 101, 102, 125, 3] {
        d.dispatch(code, &CommandArgs::new(), &mut ctx, &mut echo, &mut events)
            .unwrap();
        d.dispatch(code, &CommandArgs::new(), &mut ctx, &mut echo, &mut events)
            .unwrap();
    }

    assert_eq!(ctx.persisted(), before);
    assert!(events.events.is_empty());
}

#[test]
fn negative_minimums_and_fractional_rounding() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::default_build());
    let args = CommandArgs::new().with('X', -7.4).with('Y', -2.6);

    d.dispatch(100, &args, &mut ctx, &mut echo, &mut events).unwrap();

    assert_eq!((ctx.geometry.x_min_pos, ctx.geometry.y_min_pos), (-7, -3));
    assert_eq!(echo.text, "  C100 X-7 Y-3\n");
}

#[test]
fn inverted_bounds_are_accepted() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::default_build());
    let args = CommandArgs::new().with('X', 300.0);

    d.dispatch(100, &args, &mut ctx, &mut echo, &mut events).unwrap();

    assert_eq!(ctx.geometry.x_min_pos, 300);
    assert_eq!(ctx.geometry.inverted_axes().as_slice(), &['X']);
}

#[test]
fn inch_setter_stores_millimetres() {
    let caps = Capabilities::default_build().with(Feature::InchMode);
    let (d, mut ctx, mut echo, mut events) = make(caps);
    ctx.units = UnitSystem::Inches;

    let args = CommandArgs::new().with('X', 10.0).with('Y', 5.0);
    d.dispatch(102, &args, &mut ctx, &mut echo, &mut events).unwrap();

    assert_eq!((ctx.geometry.x_bed_size, ctx.geometry.y_bed_size), (254, 127));
    assert_eq!(echo.text, "  C102 X10.0000 Y5.0000\n");
}

#[test]
fn laser_fan_flag_beats_laser_flag() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::all());
    let args = CommandArgs::new()
        .with_flag('L')
        .with_flag('F')
        .with('O', 12.0)
        .with('H', 300.0);

    d.dispatch(3, &args, &mut ctx, &mut echo, &mut events).unwrap();

    assert!(!ctx.laser.laser_mode);
    assert_eq!(ctx.laser.off_power, 12);
    assert_eq!(ctx.laser.target_height, 255);
    assert_eq!(echo.text, "  C3 O12 H255 F ; Fan Mode enabled\n");
}

// ── Unknown and disabled codes ────────────────────────────────

#[test]
fn unknown_code_changes_nothing() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::all());
    let before = ctx.persisted();
    let args = CommandArgs::new().with('X', 1.0).with('Y', 2.0);

    let err = d.dispatch(55, &args, &mut ctx, &mut echo, &mut events).unwrap_err();

    assert_eq!(err, Error::UnknownCommand(55));
    assert_eq!(ctx.persisted(), before);
    assert_eq!(echo.text, "echo:Unknown command: \"C55\"\n");
    assert_eq!(events.events, vec![AppEvent::UnknownCommand(55)]);
}

#[test]
fn disabled_feature_code_is_unknown() {
    let caps = Capabilities::default_build().without(Feature::NozzlePark);
    let (d, mut ctx, mut echo, mut events) = make(caps);
    let args = CommandArgs::new().with('X', 50.0);

    let err = d.dispatch(125, &args, &mut ctx, &mut echo, &mut events).unwrap_err();

    assert_eq!(err, Error::UnknownCommand(125));
    assert_eq!(ctx.park.x, 10.0);
}

#[test]
fn bare_build_routes_nothing() {
    let (d, mut ctx, mut echo, mut events) = make(Capabilities::none());
    assert_eq!(d.codes().count(), 0);
    assert!(d.dispatch(10, &CommandArgs::new(), &mut ctx, &mut echo, &mut events).is_err());
}

// ── Reports ───────────────────────────────────────────────────

#[test]
fn interactive_report_full_build() {
    let (d, ctx, mut echo, _events) = make(Capabilities::all());

    d.report(&ctx, false, &mut echo);

    let expected = "\
echo:; Physical Minimums:
echo:  C100 X0 Y0
echo:; Physical Maximums:
echo:  C101 X248 Y231 Z250
echo:; Bed Size:
echo:  C102 X230 Y230
echo:; Nozzle Park Position:
echo:  C125 X10 Y10 Z20
echo:; Laser/Fan Configuration:
echo:  C3 O0 H0 L ; Laser Mode enabled
";
    assert_eq!(echo.text, expected);
}

#[test]
fn degraded_build_reports_defaults() {
    let caps = Capabilities::default_build().without(Feature::GeometryOverrides);
    let (d, mut ctx, mut echo, _events) = make(caps);
    ctx.geometry.x_bed_size = 999;

    d.report(&ctx, true, &mut echo);

    assert!(echo.text.contains("  C102 X230 Y230\n"));
    assert!(!d.handles(102));
}
