//! White-noise height generation: uniform noise blurred into terrain.

use crate::error::{GenerationError, Result};
use crate::heightmap::HeightMap;
use crate::normalize::adjust_range;
use crate::random::RandomSource;
use crate::smooth::smooth_heights;
use crate::topology::Topology;

/// Amplitude of the initial noise per smoothing pass.
const NOISE_AMPLITUDE_PER_PASS: i32 = 1000;

/// Fill the field with uniform noise in `[0, 1000 * smoothing_passes)`, blur
/// it `smoothing_passes` times and normalize it into `[0, max_level]`.
///
/// Amplitude and blur count rise together, so feature size stays in
/// proportion to total displacement. At least one pass is required.
pub fn generate_noise_field<R: RandomSource>(
    topology: &Topology,
    max_level: i32,
    smoothing_passes: u32,
    rng: &mut R,
) -> Result<HeightMap> {
    if smoothing_passes == 0 {
        return Err(GenerationError::NoSmoothingPasses);
    }

    let mut map = HeightMap::new(topology, max_level);
    let amplitude = NOISE_AMPLITUDE_PER_PASS.saturating_mul(smoothing_passes.min(i32::MAX as u32) as i32);
    for h in map.values_mut() {
        *h = rng.uniform(amplitude);
    }

    for _ in 0..smoothing_passes {
        smooth_heights(&mut map, topology, true);
    }

    adjust_range(&mut map);
    log::debug!("white-noise field: {} tiles, {} smoothing passes", map.len(), smoothing_passes);
    Ok(map)
}

/// Smoothing passes suited to a grid of this size.
pub fn recommended_smoothing(width: usize, height: usize) -> u32 {
    let sqsize = (((width * height) / 1000) as f64).sqrt() as u32;
    1 + sqsize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_zero_passes_rejected() {
        let topo = Topology::new(16, 16, true, false).unwrap();
        let mut rng = SeededRandom::new(1);
        assert!(matches!(
            generate_noise_field(&topo, 1000, 0, &mut rng),
            Err(GenerationError::NoSmoothingPasses)
        ));
    }

    #[test]
    fn test_values_in_normalized_range() {
        let topo = Topology::new(40, 25, true, false).unwrap();
        let mut rng = SeededRandom::new(99);
        let map = generate_noise_field(&topo, 1000, 2, &mut rng).unwrap();

        assert_eq!(map.len(), 1000);
        assert!(map.values().iter().all(|&h| (0..=1000).contains(&h)));
        assert_eq!(map.extremes().1, 1000);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let topo = Topology::new(30, 20, true, true).unwrap();
        let a = generate_noise_field(&topo, 1000, 3, &mut SeededRandom::new(5)).unwrap();
        let b = generate_noise_field(&topo, 1000, 3, &mut SeededRandom::new(5)).unwrap();
        let c = generate_noise_field(&topo, 1000, 3, &mut SeededRandom::new(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_smoothing_reduces_roughness() {
        let topo = Topology::new(64, 64, true, true).unwrap();
        let roughness = |map: &HeightMap| -> i64 {
            (0..map.len())
                .map(|i| {
                    let (x, y) = topo.index_to_native(i);
                    let right = topo.native_index(x as i64 + 1, y as i64).unwrap();
                    (map.get(i) - map.get(right)).abs() as i64
                })
                .sum()
        };

        let rough = generate_noise_field(&topo, 1000, 1, &mut SeededRandom::new(3)).unwrap();
        let smooth = generate_noise_field(&topo, 1000, 4, &mut SeededRandom::new(3)).unwrap();
        assert!(roughness(&smooth) < roughness(&rough));
    }

    #[test]
    fn test_recommended_smoothing() {
        assert_eq!(recommended_smoothing(10, 10), 1);
        assert_eq!(recommended_smoothing(80, 50), 3);
    }
}
