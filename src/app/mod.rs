//! Command extension core — pure logic, zero I/O.
//!
//! The dispatcher, report formatter and snapshot writer live here.  All
//! interaction with the serial port, storage and motion subsystems happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod events;
pub mod handlers;
pub mod ports;
pub mod report;
pub mod snapshot;
