//! cncconf library.
//!
//! Vendor `C`-code command extension for CNC / 3D-printer firmware:
//! machine geometry overrides, the settings report, and the
//! `config.gcode` snapshot writer.  Hardware and storage are reached only
//! through the port traits in [`app::ports`]; host adapters live in
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod units;
