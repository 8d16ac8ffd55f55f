//! End-to-end: snapshot → fresh machine → replay → identical settings.
//!
//! The replay runs through the host interpreter, which hands `C` lines to
//! the dispatcher and applies `M502`/`M500` and the unit directives, so the
//! whole script is exercised exactly as a machine would run it.

use super::mock_hw::{EchoLog, EventLog, MockMachine};

use cncconf::adapters::interpreter::HostInterpreter;
use cncconf::adapters::nvs::NvsSettingsStore;
use cncconf::app::context::MachineContext;
use cncconf::app::events::AppEvent;
use cncconf::app::ports::SettingsPort;
use cncconf::app::snapshot::ConfigSnapshotSerializer;
use cncconf::capabilities::{Capabilities, Feature};
use cncconf::units::UnitSystem;

fn edited(caps: Capabilities) -> MachineContext {
    let mut ctx = MachineContext::new(caps);
    ctx.geometry.x_bed_size = 310;
    ctx.geometry.y_bed_size = 305;
    ctx.geometry.x_min_pos = -12;
    ctx.geometry.y_min_pos = -3;
    ctx.geometry.x_max_pos = 320;
    ctx.geometry.y_max_pos = 300;
    ctx.geometry.z_max_pos = 400;
    ctx.park.x = 15.5;
    ctx.park.z = 42.0;
    ctx.laser.laser_mode = false;
    ctx.laser.off_power = 30;
    ctx.laser.target_height = 12;
    ctx
}

fn replay(caps: Capabilities, script: &str) -> (HostInterpreter, NvsSettingsStore, EventLog) {
    let mut host = HostInterpreter::new(caps);
    let nvs = NvsSettingsStore::new();
    let mut echo = EchoLog::new();
    let mut events = EventLog::new();

    let stats = host.replay(script, &nvs, &mut echo, &mut events);
    assert_eq!(stats.unknown, 0, "script:\n{script}");
    assert_eq!(stats.errors, 0, "script:\n{script}");
    (host, nvs, events)
}

/// Run `script` against an existing context through a throwaway host.
fn replay_into(ctx: &mut MachineContext, script: &str) {
    let mut host = HostInterpreter::new(ctx.capabilities());
    host.ctx = ctx.clone();
    host.replay(script, &NvsSettingsStore::new(), &mut EchoLog::new(), &mut EventLog::new());
    *ctx = host.ctx;
}

#[test]
fn full_build_round_trip() {
    let caps = Capabilities::all().without(Feature::InchMode);
    let source = edited(caps);
    let script = ConfigSnapshotSerializer::new().build(&source, &MockMachine::default());

    let (host, nvs, events) = replay(caps, &script);

    assert_eq!(host.ctx.persisted(), source.persisted());
    assert_eq!(nvs.load().unwrap(), source.persisted());
    assert_eq!(events.events.first(), Some(&AppEvent::ConfigScriptStarted));
    assert_eq!(events.count(|e| *e == AppEvent::SettingsReset), 1);
    assert_eq!(events.events.last(), Some(&AppEvent::SettingsSaved));
}

#[test]
fn inch_snapshot_replays_to_same_millimetres() {
    let caps = Capabilities::default_build().with(Feature::InchMode);
    let mut source = edited(caps);
    source.units = UnitSystem::Inches;
    let script = ConfigSnapshotSerializer::new().build(&source, &MockMachine::default());
    assert!(script.contains("  G20 ; (in)\n"));

    let (host, _nvs, _events) = replay(caps, &script);

    assert_eq!(host.ctx.units, UnitSystem::Inches);
    assert_eq!(host.ctx.geometry, source.geometry);
    assert_eq!(host.ctx.park, source.park);
}

#[test]
fn inch_snapshot_keeps_park_position_exact() {
    let caps = Capabilities::default_build().with(Feature::InchMode);
    let serializer = ConfigSnapshotSerializer::new();
    let machine = MockMachine::default();
    let mut mismatches = Vec::new();

    for i in 0..2000 {
        let mut source = MachineContext::new(caps);
        let set = format!("C125 X{} Y{} Z{}\n", f64::from(i) * 0.1, f64::from(i) * 0.037, 250 - i / 10);
        replay_into(&mut source, &set);
        source.units = UnitSystem::Inches;

        let script = serializer.build(&source, &machine);
        let (host, _nvs, _events) = replay(caps, &script);
        if host.ctx.park != source.park {
            mismatches.push((source.park, host.ctx.park));
        }
    }

    assert!(mismatches.is_empty(), "{} drifted, first {:?}", mismatches.len(), mismatches.first());
}

#[test]
fn repeated_snapshot_cycles_do_not_drift() {
    let caps = Capabilities::default_build().with(Feature::InchMode);
    let mut ctx = MachineContext::new(caps);
    replay_into(&mut ctx, "C125 X3.4 Y1.7 Z3.5\n");
    let original = ctx.park;

    for _ in 0..10 {
        ctx.units = UnitSystem::Inches;
        let script = ConfigSnapshotSerializer::new().build(&ctx, &MockMachine::default());
        let (host, _nvs, _events) = replay(caps, &script);
        ctx = host.ctx;
    }

    assert_eq!(ctx.park, original);
}

#[test]
fn replay_overrides_stale_state() {
    let caps = Capabilities::default_build();
    let source = MachineContext::new(caps);
    let script = ConfigSnapshotSerializer::new().build(&source, &MockMachine::default());

    let mut host = HostInterpreter::new(caps);
    host.ctx.geometry.x_bed_size = 999;
    host.ctx.park.y = 77.0;
    let nvs = NvsSettingsStore::new();
    host.replay(&script, &nvs, &mut EchoLog::new(), &mut EventLog::new());

    assert_eq!(host.ctx.persisted(), source.persisted());
}

#[test]
fn report_replay_form_reproduces_state() {
    let caps = Capabilities::all().without(Feature::InchMode);
    let source = edited(caps);
    let mut echo = EchoLog::new();
    HostInterpreter::new(caps).dispatcher().report(&source, true, &mut echo);

    let (host, _nvs, _events) = replay(caps, &echo.text);

    assert_eq!(host.ctx.persisted(), source.persisted());
}

#[test]
fn unknown_lines_in_a_script_change_nothing() {
    let caps = Capabilities::default_build();
    let mut host = HostInterpreter::new(caps);
    let nvs = NvsSettingsStore::new();
    let before = host.ctx.persisted();

    let stats = host.replay(
        "C55 X1 Y2\nC999\nC3 F\n",
        &nvs,
        &mut EchoLog::new(),
        &mut EventLog::new(),
    );

    assert_eq!(stats.unknown, 3);
    assert_eq!(host.ctx.persisted(), before);
}
