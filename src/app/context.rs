//! Machine context — the state threaded through every handler.
//!
//! Owns the geometry override record and the supplementary settings
//! groups, together with the build's capability set and the active unit
//! system.  There is exactly one per machine; callers pass it by `&mut`
//! into the dispatcher and by `&` into the formatter and snapshot writer.

use log::{info, warn};

use crate::capabilities::Capabilities;
use crate::config::{GeometryOverrides, LaserSettings, ParkPosition, PersistedSettings};
use crate::units::UnitSystem;

use super::events::AppEvent;
use super::ports::{EventSink, SettingsError, SettingsPort};

#[derive(Debug, Clone)]
pub struct MachineContext {
    pub geometry: GeometryOverrides,
    pub park: ParkPosition,
    pub laser: LaserSettings,
    pub units: UnitSystem,
    caps: Capabilities,
}

impl MachineContext {
    /// Fresh context with every group at its compile-time default.
    pub fn new(caps: Capabilities) -> Self {
        Self {
            geometry: GeometryOverrides::default(),
            park: ParkPosition::default(),
            laser: LaserSettings::default(),
            units: UnitSystem::default(),
            caps,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Restore every group to its compile-time default (`M502`).
    ///
    /// The unit system is a parser mode, not a setting, and is kept.
    pub fn reset_to_defaults(&mut self, sink: &mut impl EventSink) {
        self.apply(PersistedSettings::default());
        info!("Settings reset to firmware defaults");
        sink.emit(&AppEvent::SettingsReset);
    }

    /// Copy of the groups handed to the settings collaborator.
    pub fn persisted(&self) -> PersistedSettings {
        PersistedSettings {
            geometry: self.geometry,
            park: self.park,
            laser: self.laser,
        }
    }

    pub fn apply(&mut self, settings: PersistedSettings) {
        self.geometry = settings.geometry;
        self.park = settings.park;
        self.laser = settings.laser;
    }

    /// Persist all groups (`M500`).
    pub fn save_settings(
        &self,
        store: &impl SettingsPort,
        sink: &mut impl EventSink,
    ) -> Result<(), SettingsError> {
        match store.save(&self.persisted()) {
            Ok(()) => {
                sink.emit(&AppEvent::SettingsSaved);
                Ok(())
            }
            Err(e) => {
                warn!("Settings save failed: {}", e);
                sink.emit(&AppEvent::SettingsFailed(e));
                Err(e)
            }
        }
    }

    /// Restore all groups from storage (`M501`).  On failure the context is
    /// left untouched.
    pub fn load_settings(
        &mut self,
        store: &impl SettingsPort,
        sink: &mut impl EventSink,
    ) -> Result<(), SettingsError> {
        match store.load() {
            Ok(settings) => {
                self.apply(settings);
                sink.emit(&AppEvent::SettingsLoaded);
                Ok(())
            }
            Err(e) => {
                warn!("Settings load failed: {}", e);
                sink.emit(&AppEvent::SettingsFailed(e));
                Err(e)
            }
        }
    }
}
