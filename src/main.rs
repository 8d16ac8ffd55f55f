//! cncconf — host simulator.
//!
//! Replays a G-code script through the vendor command extension the way the
//! firmware's command loop would, then optionally writes the configuration
//! snapshot to a directory standing in for the SD card.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                      │
//! │                                                              │
//! │  SerialEcho      LogEventSink    NvsSettingsStore            │
//! │  (EchoSink)      (EventSink)     (SettingsPort)              │
//! │  SimulatedMotion                 DirFileStore                │
//! │  (Motion+Stepper)                (FileStore)                 │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  CommandDispatcher · report · snapshot serializer  │      │
//! │  │  over MachineContext (pure logic)                  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use cncconf::adapters::fs_store::DirFileStore;
use cncconf::adapters::interpreter::HostInterpreter;
use cncconf::adapters::log_sink::LogEventSink;
use cncconf::adapters::motion::SimulatedMotion;
use cncconf::adapters::nvs::NvsSettingsStore;
use cncconf::adapters::serial::SerialEcho;
use cncconf::app::snapshot::ConfigSnapshotSerializer;
use cncconf::capabilities::{Capabilities, Feature};

// ── CLI ───────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cncconf", version, about = "Replay C-code scripts and write config.gcode")]
struct Cli {
    /// Script to replay (`-` or omitted reads stdin).
    script: Option<PathBuf>,

    /// Enable a build feature (repeatable).
    #[arg(long = "feature", value_name = "TAG", value_parser = parse_feature)]
    features: Vec<Feature>,

    /// Disable a build feature (repeatable).
    #[arg(long = "without", value_name = "TAG", value_parser = parse_feature)]
    without: Vec<Feature>,

    /// Start from an empty feature set instead of the default build.
    #[arg(long)]
    bare: bool,

    /// Write `config.gcode` into this directory after the replay.
    #[arg(long, value_name = "DIR")]
    snapshot: Option<PathBuf>,

    /// Print the final settings record as JSON.
    #[arg(long)]
    dump_settings: bool,

    /// Suppress echo output on stdout.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_feature(tag: &str) -> Result<Feature, String> {
    Feature::from_name(tag).ok_or_else(|| {
        let known: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        format!("unknown feature '{}' (known: {})", tag, known.join(", "))
    })
}

impl Cli {
    fn capabilities(&self) -> Capabilities {
        let base = if self.bare {
            Capabilities::none()
        } else {
            Capabilities::default_build()
        };
        let caps = self.features.iter().fold(base, |c, &f| c.with(f));
        self.without.iter().fold(caps, |c, &f| c.without(f))
    }

    fn read_script(&self) -> Result<String> {
        match &self.script {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display())),
            _ => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading script from stdin")?;
                Ok(buf)
            }
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let caps = cli.capabilities();

    info!("╔══════════════════════════════════════╗");
    info!("║  cncconf v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Features: {}", caps);

    // ── 1. Adapters ───────────────────────────────────────────
    let nvs = NvsSettingsStore::new();
    let mut echo = if cli.quiet {
        SerialEcho::capturing()
    } else {
        SerialEcho::new()
    };
    let mut events = LogEventSink::new();
    let mut host = HostInterpreter::new(caps);
    info!(
        "Routes: {}",
        host.dispatcher()
            .codes()
            .map(|c| format!("C{c}"))
            .collect::<Vec<_>>()
            .join(" ")
    );

    // ── 2. Boot: restore persisted settings (M501) ───────────
    if let Err(e) = host.ctx.load_settings(&nvs, &mut events) {
        warn!("Settings load failed ({}), running with defaults", e);
    }

    // ── 3. Replay ─────────────────────────────────────────────
    let script = cli.read_script()?;
    let stats = host.replay(&script, &nvs, &mut echo, &mut events);
    info!(
        "Replay: {} executed, {} delegated, {} unknown, {} errors",
        stats.executed, stats.delegated, stats.unknown, stats.errors
    );

    // ── 4. Snapshot ───────────────────────────────────────────
    if let Some(dir) = &cli.snapshot {
        let serializer = ConfigSnapshotSerializer::new();
        let mut card = DirFileStore::new(dir);
        let motion = SimulatedMotion::default();
        let bytes = serializer
            .write_snapshot(&host.ctx, &motion, &mut card, &mut events)
            .with_context(|| format!("writing {} to {}", serializer.file_name(), dir.display()))?;
        info!("{} bytes written to {}", bytes, dir.join(serializer.file_name()).display());
    }

    if cli.dump_settings {
        let json = serde_json::to_string_pretty(&host.ctx.persisted())
            .context("encoding settings as JSON")?;
        println!("{json}");
    }

    if let Some(status) = events.status() {
        info!("Status: {}", status);
    }
    if stats.errors > 0 {
        bail!("{} script line(s) failed", stats.errors);
    }
    Ok(())
}
