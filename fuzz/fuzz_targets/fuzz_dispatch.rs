//! Fuzz target: `CommandDispatcher::dispatch`
//!
//! Decodes the input as a capability mask, a command code and a run of
//! argument words, then verifies:
//! - No panics for any value, including NaN and infinities
//! - An unrouted code leaves the settings untouched
//! - Every routed code echoes exactly one replay line
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;

use cncconf::app::commands::CommandArgs;
use cncconf::app::context::MachineContext;
use cncconf::app::dispatcher::CommandDispatcher;
use cncconf::app::events::AppEvent;
use cncconf::app::ports::{EchoSink, EventSink};
use cncconf::capabilities::{Capabilities, Feature};
use cncconf::units::UnitSystem;

#[derive(Default)]
struct Capture(String);

impl EchoSink for Capture {
    fn echo(&mut self, text: &str) {
        self.0.push_str(text);
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let mask = u16::from_le_bytes([data[0], data[1]]);
    let caps: Capabilities = Feature::ALL
        .iter()
        .copied()
        .filter(|f| mask & f.mask() != 0)
        .collect();
    let code = u16::from_le_bytes([data[2], data[3]]) % 200;

    let mut args = CommandArgs::new();
    for chunk in data[4..].chunks_exact(5) {
        let letter = char::from(b'A' + chunk[0] % 26);
        let value = if chunk[0] & 0x80 != 0 {
            None
        } else {
            Some(f32::from_le_bytes([chunk[1], chunk[2], chunk[3], chunk[4]]))
        };
        if !args.push(letter, value) {
            break;
        }
    }

    let dispatcher = CommandDispatcher::new(caps);
    let mut ctx = MachineContext::new(caps);
    if caps.has(Feature::InchMode) && mask & 0x8000 != 0 {
        ctx.units = UnitSystem::Inches;
    }
    let before = ctx.persisted();
    let mut echo = Capture::default();

    match dispatcher.dispatch(code, &args, &mut ctx, &mut echo, &mut Discard) {
        Ok(()) => {
            if code != 10 {
                assert_eq!(echo.0.lines().count(), 1, "C{code} echoed {:?}", echo.0);
            }
        }
        Err(_) => assert_eq!(ctx.persisted(), before),
    }
});
