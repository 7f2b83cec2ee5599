//! One height-map generation run.
//!
//! A session borrows the topology and settings, owns the random source for
//! the run, and hands back the field with the pole bias applied. Terrain
//! logic reads it by reference, then [`BiasedHeightMap::finish`] lifts the
//! bias and releases the final field. Both stages offer the flatness
//! classifier: hill placement that should see restored polar relief runs
//! on the finished field.

use crate::error::Result;
use crate::flatness;
use crate::fractal::generate_fractal_field;
use crate::heightmap::{HeightLevels, HeightMap};
use crate::noise_field::generate_noise_field;
use crate::poles::{apply_pole_bias, undo_pole_bias};
use crate::random::RandomSource;
use crate::settings::GeneratorSettings;
use crate::topology::Topology;

/// Which generator populates the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightGenerator {
    /// Smoothed uniform noise
    WhiteNoise { smoothing_passes: u32 },
    /// Recursive midpoint displacement
    Fractal { extra_subdivision: u32 },
}

pub struct HeightMapSession<'a, R: RandomSource> {
    topology: &'a Topology,
    settings: &'a GeneratorSettings,
    rng: R,
}

impl<'a, R: RandomSource> HeightMapSession<'a, R> {
    /// Validate the inputs. Nothing is drawn from `rng` until
    /// [`Self::generate`].
    pub fn new(topology: &'a Topology, settings: &'a GeneratorSettings, rng: R) -> Result<Self> {
        settings.validate()?;
        Ok(Self { topology, settings, rng })
    }

    /// Populate a fresh field and apply the pole bias.
    ///
    /// Each call starts from an empty field; nothing carries over from an
    /// earlier run except the position in the random sequence.
    pub fn generate(&mut self, generator: HeightGenerator) -> Result<BiasedHeightMap<'a>> {
        let mut height_map = match generator {
            HeightGenerator::WhiteNoise { smoothing_passes } => {
                generate_noise_field(self.topology, self.settings.max_level, smoothing_passes, &mut self.rng)?
            }
            HeightGenerator::Fractal { extra_subdivision } => {
                generate_fractal_field(self.topology, self.settings, extra_subdivision, &mut self.rng)?
            }
        };

        let poles_biased = self.settings.has_poles();
        if poles_biased {
            apply_pole_bias(&mut height_map, self.topology, self.settings);
        }

        let levels = HeightLevels::from_settings(self.settings);
        let stats = height_map.stats(&levels);
        log::info!(
            "{:?}: {}x{} height map, {:.1}% land, shore {} mountain {}",
            generator,
            self.topology.width,
            self.topology.height,
            stats.land_percent,
            levels.shore,
            levels.mountain
        );

        Ok(BiasedHeightMap {
            topology: self.topology,
            settings: self.settings,
            height_map,
            levels,
            poles_biased,
        })
    }
}

/// A generated field with the pole bias still applied.
pub struct BiasedHeightMap<'a> {
    topology: &'a Topology,
    settings: &'a GeneratorSettings,
    height_map: HeightMap,
    levels: HeightLevels,
    poles_biased: bool,
}

impl<'a> BiasedHeightMap<'a> {
    pub fn height_map(&self) -> &HeightMap {
        &self.height_map
    }

    pub fn levels(&self) -> &HeightLevels {
        &self.levels
    }

    pub fn poles_biased(&self) -> bool {
        self.poles_biased
    }

    /// Flatness test against this field's shore level. Polar tiles are
    /// still compressed here, so flattened polar land reads as flat.
    pub fn is_area_too_flat(&self, center: usize, hill_threshold: i32, center_elevation: i32) -> bool {
        flatness::is_area_too_flat(
            &self.height_map,
            self.topology,
            self.levels.shore,
            center,
            hill_threshold,
            center_elevation,
        )
    }

    /// Lift the pole bias and hand over the final field.
    pub fn finish(mut self) -> FinishedHeightMap<'a> {
        if self.poles_biased {
            undo_pole_bias(&mut self.height_map, self.topology, self.settings);
        }
        FinishedHeightMap {
            topology: self.topology,
            height_map: self.height_map,
            levels: self.levels,
        }
    }
}

/// The final field, with any pole bias lifted.
pub struct FinishedHeightMap<'a> {
    topology: &'a Topology,
    height_map: HeightMap,
    levels: HeightLevels,
}

impl<'a> FinishedHeightMap<'a> {
    pub fn height_map(&self) -> &HeightMap {
        &self.height_map
    }

    pub fn levels(&self) -> &HeightLevels {
        &self.levels
    }

    /// Flatness test on the restored elevations.
    pub fn is_area_too_flat(&self, center: usize, hill_threshold: i32, center_elevation: i32) -> bool {
        flatness::is_area_too_flat(
            &self.height_map,
            self.topology,
            self.levels.shore,
            center,
            hill_threshold,
            center_elevation,
        )
    }

    /// Land tiles flat enough to take a hill at the mountain level.
    pub fn count_flat_tiles(&self) -> usize {
        flatness::count_flat_tiles(&self.height_map, self.topology, &self.levels)
    }

    pub fn into_parts(self) -> (HeightMap, HeightLevels) {
        (self.height_map, self.levels)
    }
}
