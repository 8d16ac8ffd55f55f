//! Host-side command loop.
//!
//! Plays the part of the surrounding firmware's interpreter: feeds
//! tokenized lines to the [`CommandDispatcher`] (`C` codes), applies the
//! unit directives, and maps the settings directives onto the context and
//! the settings collaborator.  Motion, temperature and display
//! lines belong to other subsystems and are only logged.
//!
//! | Line        | Action                                   |
//! |-------------|------------------------------------------|
//! | `Cnnn`      | dispatcher                               |
//! | `G20`/`G21` | unit system (`G20` needs inch mode)      |
//! | `M500`      | save settings                            |
//! | `M501`      | load settings                            |
//! | `M502`      | reset to defaults                        |
//! | `M503 [S0]` | report (`S0` = replay form)              |

use log::{debug, warn};

use crate::app::context::MachineContext;
use crate::app::dispatcher::CommandDispatcher;
use crate::app::ports::{EchoSink, EventSink, SettingsPort};
use crate::capabilities::{Capabilities, Feature};
use crate::error::{Error, Result};
use crate::units::UnitSystem;

use super::script::ScriptLine;

/// What happened to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Handled by this extension.
    Executed,
    /// Belongs to another subsystem; passed over.
    Delegated,
}

/// Counters for a whole replayed script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub executed: usize,
    pub delegated: usize,
    pub unknown: usize,
    /// Lines that failed to tokenize or whose command failed.
    pub errors: usize,
}

pub struct HostInterpreter {
    dispatcher: CommandDispatcher,
    pub ctx: MachineContext,
}

impl HostInterpreter {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(caps),
            ctx: MachineContext::new(caps),
        }
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Execute one tokenized line.
    pub fn execute(
        &mut self,
        line: &ScriptLine,
        settings: &impl SettingsPort,
        echo: &mut dyn EchoSink,
        sink: &mut impl EventSink,
    ) -> Result<LineOutcome> {
        match (line.letter, line.code) {
            ('C', code) => {
                self.dispatcher
                    .dispatch(code, &line.args, &mut self.ctx, echo, sink)?;
            }
            ('G', 20) if self.ctx.capabilities().has(Feature::InchMode) => {
                self.ctx.units = UnitSystem::Inches;
            }
            ('G', 21) => self.ctx.units = UnitSystem::Millimeters,
            ('M', 500) => self.ctx.save_settings(settings, sink)?,
            ('M', 501) => self.ctx.load_settings(settings, sink)?,
            ('M', 502) => self.ctx.reset_to_defaults(sink),
            ('M', 503) => {
                let for_replay = line.args.value('S').is_some_and(|s| s == 0.0);
                self.dispatcher.report(&self.ctx, for_replay, echo);
            }
            _ => {
                debug!("Delegated: {}", line);
                return Ok(LineOutcome::Delegated);
            }
        }
        Ok(LineOutcome::Executed)
    }

    /// Tokenize and execute every line of `script`, continuing past errors.
    pub fn replay(
        &mut self,
        script: &str,
        settings: &impl SettingsPort,
        echo: &mut dyn EchoSink,
        sink: &mut impl EventSink,
    ) -> ReplayStats {
        let mut stats = ReplayStats::default();
        for (n, raw) in script.lines().enumerate() {
            let line = match ScriptLine::parse(raw) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => {
                    warn!("line {}: {} ({:?})", n + 1, e, raw);
                    stats.errors += 1;
                    continue;
                }
            };
            match self.execute(&line, settings, echo, sink) {
                Ok(LineOutcome::Executed) => stats.executed += 1,
                Ok(LineOutcome::Delegated) => stats.delegated += 1,
                Err(Error::UnknownCommand(_)) => stats.unknown += 1,
                Err(e) => {
                    warn!("line {}: {}", n + 1, e);
                    stats.errors += 1;
                }
            }
        }
        stats
    }
}
