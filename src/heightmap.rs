use crate::settings::GeneratorSettings;
use crate::tilemap::Tilemap;
use crate::topology::Topology;

// =============================================================================
// HEIGHT MAP
// =============================================================================

/// Per-tile elevation over the whole grid, indexed by native tile index.
///
/// Values are unbounded while a generator works on them and are squeezed
/// into `[0, max_level]` by the final range adjustment.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    tiles: Tilemap<i32>,
    max_level: i32,
}

impl HeightMap {
    /// A zeroed field covering every tile of the topology.
    pub fn new(topology: &Topology, max_level: i32) -> Self {
        Self {
            tiles: Tilemap::new_with(topology.width, topology.height, 0),
            max_level,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Top of the normalized range.
    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    pub fn get(&self, index: usize) -> i32 {
        *self.tiles.get_index(index)
    }

    pub fn set(&mut self, index: usize, value: i32) {
        self.tiles.set_index(index, value);
    }

    pub fn values(&self) -> &[i32] {
        self.tiles.as_slice()
    }

    pub fn values_mut(&mut self) -> &mut [i32] {
        self.tiles.as_mut_slice()
    }

    pub fn tiles(&self) -> &Tilemap<i32> {
        &self.tiles
    }

    /// Lowest and highest elevation in the field.
    pub fn extremes(&self) -> (i32, i32) {
        let mut min_h = i32::MAX;
        let mut max_h = i32::MIN;
        for &h in self.values() {
            min_h = min_h.min(h);
            max_h = max_h.max(h);
        }
        (min_h, max_h)
    }

    /// Summary statistics against the derived levels.
    pub fn stats(&self, levels: &HeightLevels) -> HeightMapStats {
        let (min, max) = self.extremes();
        let total = self.len().max(1) as f32;
        let land = self.values().iter().filter(|&&h| h > levels.shore).count();
        let mountains = self.values().iter().filter(|&&h| h > levels.mountain).count();

        HeightMapStats {
            min,
            max,
            land_percent: 100.0 * land as f32 / total,
            mountain_percent: 100.0 * mountains as f32 / total,
        }
    }
}

// =============================================================================
// DERIVED LEVELS
// =============================================================================

/// Threshold elevations derived from the settings once the field is in its
/// normalized range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightLevels {
    /// Tiles above this are land
    pub shore: i32,
    /// Land above this is hills or mountains
    pub mountain: i32,
}

impl HeightLevels {
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let shore = settings.max_level * (100 - settings.land_percent) / 100;
        let mountain = (settings.max_level - shore) * (100 - settings.steepness) / 100 + shore;
        Self { shore, mountain }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightMapStats {
    pub min: i32,
    pub max: i32,
    pub land_percent: f32,
    pub mountain_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_covers_grid() {
        let topo = Topology::new(7, 5, true, false).unwrap();
        let map = HeightMap::new(&topo, 1000);
        assert_eq!(map.len(), 35);
        assert!(map.values().iter().all(|&h| h == 0));
    }

    #[test]
    fn test_extremes() {
        let topo = Topology::new(3, 3, false, false).unwrap();
        let mut map = HeightMap::new(&topo, 1000);
        map.set(2, -40);
        map.set(7, 55);
        assert_eq!(map.extremes(), (-40, 55));
    }

    #[test]
    fn test_default_levels() {
        let levels = HeightLevels::from_settings(&GeneratorSettings::default());
        assert_eq!(levels.shore, 700);
        assert_eq!(levels.mountain, 910);
    }

    #[test]
    fn test_stats_land_share() {
        let topo = Topology::new(4, 1, true, false).unwrap();
        let mut map = HeightMap::new(&topo, 1000);
        map.set(0, 100);
        map.set(1, 750);
        map.set(2, 950);
        map.set(3, 1000);

        let levels = HeightLevels { shore: 700, mountain: 910 };
        let stats = map.stats(&levels);
        assert_eq!(stats.min, 100);
        assert_eq!(stats.max, 1000);
        assert!((stats.land_percent - 75.0).abs() < f32::EPSILON);
        assert!((stats.mountain_percent - 50.0).abs() < f32::EPSILON);
    }
}
