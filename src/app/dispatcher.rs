//! Command dispatcher — routes `C` codes to their handlers.
//!
//! ```text
//!  parser ──(code, args)──▶ CommandDispatcher ──▶ handler(ctx, args, echo)
//!                                  │                      │
//!                           unknown code             report line
//!                                  ▼                      ▼
//!                      "echo:Unknown command"        EchoSink
//! ```
//!
//! The route table is fixed at construction from the capability set.  A
//! code missing from the table (unknown, or belonging to a disabled
//! feature) takes the fallback path: one diagnostic line, one event, no
//! state change.

use log::{debug, warn};

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};

use super::commands::CommandArgs;
use super::context::MachineContext;
use super::events::AppEvent;
use super::handlers::{Route, RouteTable, build_route_table};
use super::ports::{EchoSink, EventSink};
use super::report::report_all;

pub struct CommandDispatcher {
    routes: RouteTable,
}

impl CommandDispatcher {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            routes: build_route_table(caps),
        }
    }

    /// Run the handler for `code`.
    ///
    /// Returns [`Error::UnknownCommand`] when no handler exists; the error is
    /// terminal to this command only and the context is untouched.
    pub fn dispatch(
        &self,
        code: u16,
        args: &CommandArgs,
        ctx: &mut MachineContext,
        echo: &mut dyn EchoSink,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let Some(route) = self.route(code) else {
            warn!("Unknown command C{}", code);
            echo.echo(&format!("echo:Unknown command: \"C{code}\"\n"));
            sink.emit(&AppEvent::UnknownCommand(code));
            return Err(Error::UnknownCommand(code));
        };

        debug!("C{} ({})", route.code, route.name);
        if let Some(event) = (route.handler)(ctx, args, echo) {
            sink.emit(&event);
        }
        Ok(())
    }

    /// Echo every group's report; headings only when `for_replay` is false.
    pub fn report(&self, ctx: &MachineContext, for_replay: bool, echo: &mut dyn EchoSink) {
        let text = report_all(ctx, for_replay);
        if !text.is_empty() {
            echo.echo(&text);
        }
    }

    pub fn handles(&self, code: u16) -> bool {
        self.route(code).is_some()
    }

    /// Routed codes, in table order.
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.routes.iter().map(|r| r.code)
    }

    fn route(&self, code: u16) -> Option<&Route> {
        self.routes.iter().find(|r| r.code == code)
    }
}
