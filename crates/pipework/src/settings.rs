//! Build settings shared by the pipe and connector builders.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Tunable constants for geometry construction.
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```
/// use pipework::BuildSettings;
///
/// let settings = BuildSettings::from_toml_str("arc_segments = 64").unwrap();
/// assert_eq!(settings.arc_segments, 64);
/// assert_eq!(settings.alignment_decimals, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Distance under which two pipe endpoints count as the same junction.
    pub coincidence_tolerance: f64,
    /// Decimal places an angle is rounded to before the alignment test.
    pub alignment_decimals: i32,
    /// Angle (radians) to ±Z under which the +Y up vector is used instead.
    pub up_vector_threshold: f64,
    /// Segments per full circle when arcs are sampled.
    pub arc_segments: u32,
    /// Maximum rebuild requests processed by one recompute.
    pub max_cascade: usize,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            coincidence_tolerance: 0.001,
            alignment_decimals: 1,
            up_vector_threshold: 0.01,
            arc_segments: 32,
            max_cascade: 256,
        }
    }
}

impl BuildSettings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: BuildSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("coincidence_tolerance", self.coincidence_tolerance),
            ("up_vector_threshold", self.up_vector_threshold),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if self.arc_segments < 3 {
            return Err(SettingsError::TooFewArcSegments(self.arc_segments));
        }
        if self.max_cascade == 0 {
            return Err(SettingsError::ZeroCascade);
        }
        Ok(())
    }
}
