//! Mock collaborators for integration tests.
//!
//! Records every echo line, event and storage call so tests can assert on
//! the full history without a serial port, an SD card or a planner.

use cncconf::app::events::AppEvent;
use cncconf::app::ports::{
    Axis, EchoSink, EventSink, FileError, FileStore, MotionPort, PlannerSettings, Stepper,
    StepperPort,
};

// ── Echo capture ──────────────────────────────────────────────

#[derive(Default)]
pub struct EchoLog {
    pub text: String,
}

#[allow(dead_code)]
impl EchoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl EchoSink for EchoLog {
    fn echo(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

// ── Event capture ─────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Planner / drivers ─────────────────────────────────────────

/// Stock machine: dual Z motors, no secondary X/Y drivers.
pub struct MockMachine {
    pub planner: PlannerSettings,
    pub endstop_adj: [f32; 3],
}

impl Default for MockMachine {
    fn default() -> Self {
        Self {
            planner: PlannerSettings {
                steps_per_unit: [80.0, 80.0, 400.0],
                max_feedrate: [500.0, 500.0, 5.0],
                max_acceleration: [500.0, 500.0, 100.0],
                acceleration: 500.0,
                retract_acceleration: 1000.0,
                travel_acceleration: 500.0,
                min_segment_time_us: 20000,
                min_feedrate: 0.0,
                min_travel_feedrate: 0.0,
                max_jerk: [8.0, 8.0, 0.4],
            },
            endstop_adj: [0.05, -0.1, 0.25],
        }
    }
}

impl MotionPort for MockMachine {
    fn planner(&self) -> PlannerSettings {
        self.planner
    }

    fn home_offset(&self) -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }

    fn probe_offset(&self) -> [f32; 3] {
        [-44.0, -9.0, -1.2]
    }

    fn endstop_adjustment(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.endstop_adj[0],
            Axis::Y => self.endstop_adj[1],
            Axis::Z => self.endstop_adj[2],
        }
    }
}

impl StepperPort for MockMachine {
    fn current_ma(&self, stepper: Stepper) -> Option<u16> {
        match stepper {
            Stepper::X | Stepper::Y | Stepper::Z | Stepper::Z2 => Some(580),
            Stepper::X2 | Stepper::Y2 => None,
        }
    }
}

// ── Storage card ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CardCall {
    Open(String),
    Write(usize),
    Close,
}

/// Storage card with per-stage failure injection.
#[derive(Default)]
pub struct MockCard {
    pub calls: Vec<CardCall>,
    pub data: Vec<u8>,
    pub fail_open: Option<FileError>,
    pub fail_write: Option<FileError>,
    pub fail_close: Option<FileError>,
    /// Accept at most this many bytes per write.
    pub accept: Option<usize>,
}

#[allow(dead_code)]
impl MockCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl FileStore for MockCard {
    fn open_write(&mut self, name: &str) -> Result<(), FileError> {
        self.calls.push(CardCall::Open(name.to_string()));
        self.fail_open.map_or(Ok(()), Err)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, FileError> {
        if let Some(e) = self.fail_write {
            return Err(e);
        }
        let n = self.accept.unwrap_or(data.len()).min(data.len());
        self.calls.push(CardCall::Write(n));
        self.data.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn close(&mut self) -> Result<(), FileError> {
        self.calls.push(CardCall::Close);
        self.fail_close.map_or(Ok(()), Err)
    }
}
