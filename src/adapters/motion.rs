//! Simulated motion subsystems.
//!
//! Implements [`MotionPort`] and [`StepperPort`] with the values a stock
//! machine boots with.  Fields are public so the host simulator (and tests)
//! can stand in for planner changes made by other commands.

use crate::app::ports::{Axis, MotionPort, PlannerSettings, Stepper, StepperPort};

#[derive(Debug, Clone)]
pub struct SimulatedMotion {
    pub planner: PlannerSettings,
    pub home_offset: [f32; 3],
    pub probe_offset: [f32; 3],
    /// Secondary endstop trim, XYZ.
    pub endstop_adj: [f32; 3],
    /// Run currents (mA) for X, Y, Z, X2, Y2, Z2; `None` = no smart driver.
    pub currents: [Option<u16>; 6],
}

impl Default for SimulatedMotion {
    fn default() -> Self {
        Self {
            planner: PlannerSettings {
                steps_per_unit: [80.0, 80.0, 400.0],
                max_feedrate: [500.0, 500.0, 5.0],
                max_acceleration: [500.0, 500.0, 100.0],
                acceleration: 500.0,
                retract_acceleration: 500.0,
                travel_acceleration: 500.0,
                min_segment_time_us: 20000,
                min_feedrate: 0.0,
                min_travel_feedrate: 0.0,
                max_jerk: [8.0, 8.0, 0.4],
            },
            home_offset: [0.0; 3],
            probe_offset: [-44.0, -9.0, -1.2],
            endstop_adj: [0.0; 3],
            currents: [Some(580), Some(580), Some(580), None, None, None],
        }
    }
}

impl MotionPort for SimulatedMotion {
    fn planner(&self) -> PlannerSettings {
        self.planner
    }

    fn home_offset(&self) -> [f32; 3] {
        self.home_offset
    }

    fn probe_offset(&self) -> [f32; 3] {
        self.probe_offset
    }

    fn endstop_adjustment(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.endstop_adj[0],
            Axis::Y => self.endstop_adj[1],
            Axis::Z => self.endstop_adj[2],
        }
    }
}

impl StepperPort for SimulatedMotion {
    fn current_ma(&self, stepper: Stepper) -> Option<u16> {
        let idx = match stepper {
            Stepper::X => 0,
            Stepper::Y => 1,
            Stepper::Z => 2,
            Stepper::X2 => 3,
            Stepper::Y2 => 4,
            Stepper::Z2 => 5,
        };
        self.currents[idx]
    }
}
