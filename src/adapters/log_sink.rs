//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the logger
//! (serial console in production).  The status-line/buzzer adapter of a
//! real display would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] and remembers the last status text.
#[derive(Default)]
pub struct LogEventSink {
    status: Option<&'static str>,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last status-line message, as a display would show it.
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::UnknownCommand(code) => {
                warn!("CMD | unknown C{}", code);
            }
            AppEvent::SettingsChanged { code } => {
                info!("CMD | C{} updated settings", code);
            }
            AppEvent::ConfigScriptStarted => {
                info!("CFG | applying configuration script");
                self.status = Some("Applying configuration");
            }
            AppEvent::SnapshotStored { bytes } => {
                info!("CFG | snapshot stored, {} bytes | BEEP(ok)", bytes);
                self.status = Some("Config GCode Stored");
            }
            AppEvent::SnapshotFailed(e) => {
                warn!("CFG | snapshot failed: {} | BEEP(error)", e);
                self.status = Some("Config GCode Failed");
            }
            AppEvent::SettingsReset => {
                info!("EEPROM | reset to defaults");
            }
            AppEvent::SettingsSaved => {
                info!("EEPROM | settings stored");
                self.status = Some("Settings Stored");
            }
            AppEvent::SettingsLoaded => {
                info!("EEPROM | settings loaded");
            }
            AppEvent::SettingsFailed(e) => {
                warn!("EEPROM | {}", e);
                self.status = Some("Settings Error");
            }
        }
    }
}
