//! Browser automation ("stealth") profiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// JA4+ fingerprint strings presented by the automation driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Ja4Fingerprint {
    /// TLS client fingerprint.
    pub ja4: String,
    /// HTTP client fingerprint.
    pub ja4h: String,
    /// X.509 certificate fingerprint.
    pub ja4x: String,
    /// TCP client fingerprint.
    pub ja4t: String,
}

/// Human-like pacing, in milliseconds or units per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum delay between actions (ms).
    pub min_delay: u32,
    /// Maximum delay between actions (ms).
    pub max_delay: u32,
    /// Simulated typing speed (characters per minute).
    pub typing_speed: u32,
    /// Simulated pointer speed (pixels per second).
    pub mouse_movement_speed: u32,
}

/// Browser viewport emulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AutomationConfig {
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Viewport height in CSS pixels.
    pub viewport_height: u32,
    /// Device pixel ratio.
    pub device_scale_factor: f64,
    /// Emulate a mobile device.
    pub is_mobile: bool,
    /// Emulate touch support.
    pub has_touch: bool,
}

/// Detection vectors the driver patches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct EvasionConfig {
    /// Hide `navigator.webdriver`.
    pub webdriver_detection: bool,
    /// Hide automation extension markers.
    pub automation_detection: bool,
    /// Hide headless browser markers.
    pub headless_detection: bool,
    /// Add noise to canvas reads.
    pub canvas_fingerprinting: bool,
    /// Spoof WebGL vendor strings.
    pub webgl_fingerprinting: bool,
}

/// One automation profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StealthProfile {
    /// Unique profile name. Filled from the mapping key when the entry comes
    /// from the profiles document.
    pub name: String,

    /// Human description.
    pub description: String,

    /// Fingerprint strings.
    pub ja4_fingerprint: Ja4Fingerprint,

    /// Headers reproduced verbatim, in order, on outbound requests.
    pub headers: IndexMap<String, String>,

    /// Pacing parameters.
    pub timing: TimingConfig,

    /// Viewport emulation.
    pub automation: AutomationConfig,

    /// Evasion toggles.
    pub evasion: EvasionConfig,
}

impl StealthProfile {
    /// Check that `timing.min_delay` does not exceed a set `timing.max_delay`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the delays are inverted.
    pub fn check_values(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.max_delay > 0 && timing.min_delay > timing.max_delay {
            return Err(ConfigError::invalid_value(
                format!("stealth_profiles.{}.timing.min_delay", self.name),
                format!(
                    "min_delay {} exceeds max_delay {}",
                    timing.min_delay, timing.max_delay
                ),
            ));
        }
        Ok(())
    }
}
