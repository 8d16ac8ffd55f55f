//! Capability descriptor.
//!
//! The set of optional firmware features present in this build, computed
//! once at startup.  Both the dispatcher's route table and the snapshot
//! writer consult the same value, so every combination is testable from a
//! single binary.

use core::fmt;

/// One optional feature.  Each variant owns one bit of [`Capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Feature {
    /// Vendor `C` command family (`C10`).
    CustomCommands = 1 << 0,
    /// Runtime geometry overrides (`C100`, `C101`, `C102`).
    GeometryOverrides = 1 << 1,
    /// Configurable nozzle park point (`C125`).
    NozzlePark = 1 << 2,
    /// Laser/fan mode switching (`C3`).
    Laser = 1 << 3,
    /// `G20` inch units.
    InchMode = 1 << 4,
    /// Classic XYZ jerk limits in `M205`.
    ClassicJerk = 1 << 5,
    /// Second X endstop with trim.
    DualEndstopsX = 1 << 6,
    /// Second Y endstop with trim.
    DualEndstopsY = 1 << 7,
    /// Multiple Z endstops with trim.
    MultiEndstopsZ = 1 << 8,
    /// Smart stepper drivers with software current control.
    TrinamicConfig = 1 << 9,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Self::CustomCommands,
        Self::GeometryOverrides,
        Self::NozzlePark,
        Self::Laser,
        Self::InchMode,
        Self::ClassicJerk,
        Self::DualEndstopsX,
        Self::DualEndstopsY,
        Self::MultiEndstopsZ,
        Self::TrinamicConfig,
    ];

    pub const fn mask(self) -> u16 {
        self as u16
    }

    /// Kebab-case tag used on the command line and in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CustomCommands => "custom-commands",
            Self::GeometryOverrides => "geometry-overrides",
            Self::NozzlePark => "nozzle-park",
            Self::Laser => "laser",
            Self::InchMode => "inch-mode",
            Self::ClassicJerk => "classic-jerk",
            Self::DualEndstopsX => "dual-endstops-x",
            Self::DualEndstopsY => "dual-endstops-y",
            Self::MultiEndstopsZ => "multi-endstops-z",
            Self::TrinamicConfig => "trinamic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit set of enabled [`Feature`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    /// No optional features at all.
    pub const fn none() -> Self {
        Self(0)
    }

    /// Every feature enabled.
    pub fn all() -> Self {
        Feature::ALL.into_iter().collect()
    }

    /// Stock build: custom commands, geometry overrides, park, classic
    /// jerk and smart drivers.
    pub fn default_build() -> Self {
        [
            Feature::CustomCommands,
            Feature::GeometryOverrides,
            Feature::NozzlePark,
            Feature::ClassicJerk,
            Feature::TrinamicConfig,
        ]
        .into_iter()
        .collect()
    }

    #[must_use]
    pub const fn with(self, feature: Feature) -> Self {
        Self(self.0 | feature.mask())
    }

    #[must_use]
    pub const fn without(self, feature: Feature) -> Self {
        Self(self.0 & !feature.mask())
    }

    pub const fn has(self, feature: Feature) -> bool {
        self.0 & feature.mask() != 0
    }

    /// Whether any endstop-trim feature is present.
    pub const fn has_extra_endstops(self) -> bool {
        self.has(Feature::DualEndstopsX)
            || self.has(Feature::DualEndstopsY)
            || self.has(Feature::MultiEndstopsZ)
    }

    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.has(*f))
    }
}

impl FromIterator<Feature> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for feature in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(feature.name())?;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
