//! Detects land that is too flat, so terrain touch-up can force a hill in.

use crate::heightmap::{HeightLevels, HeightMap};
use crate::topology::Topology;

/// Radius of the scanned neighbourhood around the centre tile
const SCAN_RADIUS: usize = 2;

/// Most strictly-higher tiles tolerated anywhere in the neighbourhood
const MAX_HIGHER_TILES: usize = 2;

/// Whether the area around `center` lacks relief.
///
/// The area has relief, and this returns false, if any tile within two
/// steps exceeds `hill_threshold`, if a tile one step away is higher than
/// `center_elevation`, or if more than two tiles are higher. Otherwise the
/// remaining relief budget is weighed against the centre's own height above
/// `shore_level`.
pub fn is_area_too_flat(
    map: &HeightMap,
    topology: &Topology,
    shore_level: i32,
    center: usize,
    hill_threshold: i32,
    center_elevation: i32,
) -> bool {
    let mut higher_count = 0usize;

    for (tile, distance) in topology.square_neighborhood(center, SCAN_RADIUS) {
        let h = map.get(tile);
        if h > hill_threshold {
            return false;
        }
        if h > center_elevation {
            if distance == 1 {
                return false;
            }
            higher_count += 1;
            if higher_count > MAX_HIGHER_TILES {
                return false;
            }
        }
    }

    let spare_relief = (hill_threshold as i64 - shore_level as i64) * higher_count as i64;
    let own_relief = (center_elevation as i64 - shore_level as i64) * 4;
    spare_relief <= own_relief
}

/// Land tiles the classifier flags with the mountain level as hill
/// threshold.
pub fn count_flat_tiles(map: &HeightMap, topology: &Topology, levels: &HeightLevels) -> usize {
    (0..map.len())
        .filter(|&i| map.get(i) > levels.shore)
        .filter(|&i| is_area_too_flat(map, topology, levels.shore, i, levels.mountain, map.get(i)))
        .count()
}
