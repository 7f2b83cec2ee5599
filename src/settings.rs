//! Generator configuration.
//!
//! Settings can be built in code, or loaded from a JSON file where every
//! field is optional and falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// Upper bound of the colatitude scale: 0 is a pole, this is the equator.
pub const MAX_COLATITUDE: i32 = 1000;

/// Temperature at or above which the map has no polar regions.
const POLELESS_TEMPERATURE: i32 = 70;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Target percentage of land tiles (0-100)
    pub land_percent: i32,
    /// Percentage of land that rises above the mountain level (0-100)
    pub steepness: i32,
    /// How hard the poles are flattened (0 = untouched, 100 = flat)
    pub flat_poles: i32,
    /// Push a band of sea between the polar ice and the continents
    pub separate_poles: bool,
    /// Climate temperature (0-100); poles exist below 70
    pub temperature: i32,
    /// Treat the whole map as temperate, with no poles at all
    pub all_temperate: bool,
    /// Colatitude of the ice line
    pub ice_base_level: i32,
    /// Distance from a non-wrapping edge that counts as a singularity
    pub singularity_radius: usize,
    /// Top of the normalized height range
    pub max_level: i32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            land_percent: 30,
            steepness: 30,
            flat_poles: 100,
            separate_poles: true,
            temperature: 50,
            all_temperate: false,
            ice_base_level: MAX_COLATITUDE / 5,
            singularity_radius: 2,
            max_level: 1000,
        }
    }
}

impl GeneratorSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        check_percent("land_percent", self.land_percent)?;
        check_percent("steepness", self.steepness)?;
        check_percent("flat_poles", self.flat_poles)?;
        check_percent("temperature", self.temperature)?;

        if self.max_level <= 0 {
            return Err(GenerationError::InvalidSetting {
                name: "max_level",
                value: self.max_level as i64,
                reason: "must be positive",
            });
        }
        if self.ice_base_level <= 0 || self.ice_base_level > MAX_COLATITUDE {
            return Err(GenerationError::InvalidSetting {
                name: "ice_base_level",
                value: self.ice_base_level as i64,
                reason: "must lie in 1..=1000",
            });
        }
        Ok(())
    }

    /// Whether the map has polar regions that need elevation bias.
    pub fn has_poles(&self) -> bool {
        !self.all_temperate && self.temperature < POLELESS_TEMPERATURE
    }
}

fn check_percent(name: &'static str, value: i32) -> Result<()> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::InvalidSetting {
            name,
            value: value as i64,
            reason: "must lie in 0..=100",
        })
    }
}
