//! Wrap-aware separable blur over an integer field.

use crate::heightmap::HeightMap;
use crate::topology::Topology;

/// 5-tap kernel, offsets -2..=2
const WEIGHTS: [f64; 5] = [0.13, 0.19, 0.37, 0.19, 0.13];

/// Blur the field once along x, then once along y.
///
/// With `zeroes_at_edges`, taps that fall off a non-wrapping edge count as
/// zero, which pulls elevation down along those edges. Otherwise the
/// result is normalized by the weights that landed on the map.
pub fn smooth_heights(map: &mut HeightMap, topology: &Topology, zeroes_at_edges: bool) {
    let mut scratch = vec![0i32; map.len()];

    blur_axis(map.values(), &mut scratch, topology, zeroes_at_edges, true);
    blur_axis(&scratch, map.values_mut(), topology, zeroes_at_edges, false);
}

fn blur_axis(source: &[i32], target: &mut [i32], topology: &Topology, zeroes_at_edges: bool, horizontal: bool) {
    for (index, out) in target.iter_mut().enumerate() {
        let (x, y) = topology.index_to_native(index);
        let mut numerator = 0.0f64;
        let mut denominator = 0.0f64;

        for (i, &weight) in WEIGHTS.iter().enumerate() {
            let offset = i as i64 - 2;
            if let Some(near) = topology.axis_neighbor(x, y, offset, horizontal) {
                numerator += weight * source[near] as f64;
                denominator += weight;
            }
        }
        if zeroes_at_edges {
            denominator = 1.0;
        }

        *out = (numerator / denominator) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(topology: &Topology, value: i32) -> HeightMap {
        let mut map = HeightMap::new(topology, 1000);
        map.values_mut().fill(value);
        map
    }

    #[test]
    fn test_flat_torus_is_unchanged() {
        let topo = Topology::new(8, 8, true, true).unwrap();
        let mut map = filled(&topo, 500);
        smooth_heights(&mut map, &topo, true);
        // Kernel weights sum to 1.01, so a flat field drifts by at most rounding
        assert!(map.values().iter().all(|&h| (500..=510).contains(&h)));
    }

    #[test]
    fn test_edges_damped_with_zeroes() {
        let topo = Topology::new(10, 10, true, false).unwrap();
        let mut map = filled(&topo, 1000);
        smooth_heights(&mut map, &topo, true);

        let edge = map.get(topo.native_index(4, 0).unwrap());
        let middle = map.get(topo.native_index(4, 5).unwrap());
        assert!(edge < middle);
    }

    #[test]
    fn test_edges_renormalized_without_zeroes() {
        let topo = Topology::new(10, 10, false, false).unwrap();
        let mut map = filled(&topo, 1000);
        smooth_heights(&mut map, &topo, false);
        assert!(map.values().iter().all(|&h| (990..=1010).contains(&h)));
    }

    #[test]
    fn test_spike_spreads_across_seam() {
        let topo = Topology::new(9, 9, true, true).unwrap();
        let mut map = filled(&topo, 0);
        map.set(topo.native_index(0, 4).unwrap(), 10_000);
        smooth_heights(&mut map, &topo, true);

        assert!(map.get(topo.native_index(8, 4).unwrap()) > 0);
        assert!(map.get(topo.native_index(0, 4).unwrap()) < 10_000);
        assert_eq!(map.get(topo.native_index(4, 4).unwrap()), 0);
    }
}
