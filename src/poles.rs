//! Latitude-dependent elevation bias near the poles.
//!
//! The forward pass flattens tiles at topological singularities to the
//! ocean baseline and compresses elevation inside the polar band, so that
//! continents do not pile up on the poles. The inverse pass restores the
//! polar band once terrain has been placed.
//!
//! Tiles at zero elevation or zero colatitude are skipped by the inverse:
//! a zero cannot be told apart from a value flattened by the forward pass.

use crate::heightmap::HeightMap;
use crate::settings::GeneratorSettings;
use crate::topology::Topology;

/// Elevation forced onto singular tiles.
pub const POLE_BASELINE: i32 = 0;

/// Flat factor applied in the separate-poles band.
const SEPARATE_POLES_FACTOR: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PoleBand {
    Singular,
    Scaled(f64),
    None,
}

fn classify(topology: &Topology, settings: &GeneratorSettings, index: usize) -> PoleBand {
    let colatitude = topology.colatitude(index) as f64;
    let ice = settings.ice_base_level as f64;

    if topology.near_singularity(index) {
        PoleBand::Singular
    } else if colatitude < 2.0 * ice {
        PoleBand::Scaled(colatitude / (2.5 * ice))
    } else if colatitude <= 2.5 * ice {
        if settings.separate_poles {
            PoleBand::Scaled(SEPARATE_POLES_FACTOR)
        } else {
            PoleBand::Scaled(colatitude / (2.5 * ice))
        }
    } else {
        PoleBand::None
    }
}

/// Flatten singular tiles and compress elevation near the poles.
pub fn apply_pole_bias(map: &mut HeightMap, topology: &Topology, settings: &GeneratorSettings) {
    let mut flattened = 0usize;
    let mut scaled = 0usize;

    for index in 0..map.len() {
        match classify(topology, settings, index) {
            PoleBand::Singular => {
                map.set(index, POLE_BASELINE);
                flattened += 1;
            }
            PoleBand::Scaled(factor) => {
                map.set(index, (map.get(index) as f64 * factor).round() as i32);
                scaled += 1;
            }
            PoleBand::None => {}
        }
    }
    log::debug!("pole bias: {} tiles flattened, {} tiles scaled", flattened, scaled);
}

/// Undo [`apply_pole_bias`] for every tile it scaled.
///
/// Flattened tiles stay at the baseline, and zero-valued or zero-colatitude
/// tiles are left alone.
pub fn undo_pole_bias(map: &mut HeightMap, topology: &Topology, settings: &GeneratorSettings) {
    for index in 0..map.len() {
        let h = map.get(index);
        if h == 0 || topology.colatitude(index) == 0 {
            continue;
        }
        if let PoleBand::Scaled(factor) = classify(topology, settings, index) {
            map.set(index, (h as f64 / factor).round() as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(width: usize, height: usize, separate_poles: bool) -> (Topology, GeneratorSettings, HeightMap) {
        let settings = GeneratorSettings {
            separate_poles,
            ..Default::default()
        };
        let topo = Topology::new(width, height, true, false).unwrap().with_settings(&settings);
        let mut map = HeightMap::new(&topo, settings.max_level);
        for (i, h) in map.values_mut().iter_mut().enumerate() {
            *h = 400 + (i as i32 * 37) % 600;
        }
        (topo, settings, map)
    }

    #[test]
    fn test_singular_rows_flattened() {
        let (topo, settings, mut map) = setup(8, 41, true);
        apply_pole_bias(&mut map, &topo, &settings);

        for x in 0..8 {
            for y in [0, 1, 39, 40] {
                assert_eq!(map.get(topo.native_index(x, y).unwrap()), POLE_BASELINE);
            }
        }
    }

    #[test]
    fn test_equator_untouched() {
        let (topo, settings, original) = setup(8, 41, true);
        let mut map = original.clone();
        apply_pole_bias(&mut map, &topo, &settings);

        let equator = topo.native_index(3, 20).unwrap();
        assert_eq!(map.get(equator), original.get(equator));
    }

    #[test]
    fn test_polar_band_compressed() {
        let (topo, settings, original) = setup(8, 41, false);
        let mut map = original.clone();
        apply_pole_bias(&mut map, &topo, &settings);

        // Row 4 sits at colatitude 200, well inside the ice band
        let idx = topo.native_index(2, 4).unwrap();
        assert_eq!(topo.colatitude(idx), 200);
        let expected = (original.get(idx) as f64 * 200.0 / 500.0).round() as i32;
        assert_eq!(map.get(idx), expected);
    }

    #[test]
    fn test_separate_poles_band_uses_flat_factor() {
        let (topo, settings, original) = setup(8, 41, true);
        let mut map = original.clone();
        apply_pole_bias(&mut map, &topo, &settings);

        // Row 9 is at colatitude 450, between 2x and 2.5x the ice line
        let idx = topo.native_index(5, 9).unwrap();
        assert_eq!(topo.colatitude(idx), 450);
        assert_eq!(map.get(idx), (original.get(idx) as f64 * 0.1).round() as i32);
    }

    #[test]
    fn test_undo_restores_within_rounding() {
        for separate in [true, false] {
            let (topo, settings, original) = setup(8, 41, separate);
            let mut map = original.clone();
            apply_pole_bias(&mut map, &topo, &settings);
            undo_pole_bias(&mut map, &topo, &settings);

            for index in 0..map.len() {
                match classify(&topo, &settings, index) {
                    PoleBand::Singular => assert_eq!(map.get(index), POLE_BASELINE),
                    PoleBand::None => assert_eq!(map.get(index), original.get(index)),
                    PoleBand::Scaled(factor) => {
                        // One rounding step in the compressed space
                        let tolerance = (0.5 / factor).ceil() as i32;
                        assert!(
                            (map.get(index) - original.get(index)).abs() <= tolerance,
                            "tile {} restored to {} from {}",
                            index,
                            map.get(index),
                            original.get(index)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_undo_exact_when_scaling_is_exact() {
        let (topo, settings, _) = setup(8, 41, true);
        let mut map = HeightMap::new(&topo, settings.max_level);
        // Multiples of 10 survive the x0.1 band exactly
        let idx = topo.native_index(5, 9).unwrap();
        map.set(idx, 730);
        apply_pole_bias(&mut map, &topo, &settings);
        assert_eq!(map.get(idx), 73);
        undo_pole_bias(&mut map, &topo, &settings);
        assert_eq!(map.get(idx), 730);
    }

    #[test]
    fn test_values_rounded_to_zero_are_not_restored() {
        // Known non-invertible subset: a small value squeezed to zero is
        // indistinguishable from a flattened tile.
        let (topo, settings, _) = setup(8, 41, true);
        let mut map = HeightMap::new(&topo, settings.max_level);
        let idx = topo.native_index(5, 9).unwrap();
        map.set(idx, 4);
        apply_pole_bias(&mut map, &topo, &settings);
        assert_eq!(map.get(idx), 0);
        undo_pole_bias(&mut map, &topo, &settings);
        assert_eq!(map.get(idx), 0);
    }
}
