//! Range adjustment: histogram equalization into `[0, max_level]`.

use crate::heightmap::HeightMap;

/// Rescale the field so values spread evenly over `[0, max_level]`, using
/// the field's own `max_level`.
///
/// Each value maps to the share of tiles at or below it, times `max_level`.
/// Ordering is preserved and the highest raw value always lands on
/// `max_level`.
pub fn adjust_range(map: &mut HeightMap) {
    if map.is_empty() {
        return;
    }

    let max_level = map.max_level();
    let (min_h, max_h) = map.extremes();
    let total = map.len() as i64;
    let span = (max_h as i64 - min_h as i64 + 1) as usize;

    let mut frequencies = vec![0i64; span];
    for &h in map.values() {
        frequencies[(h as i64 - min_h as i64) as usize] += 1;
    }

    let mut count = 0i64;
    for slot in frequencies.iter_mut() {
        count += *slot;
        *slot = count * max_level as i64 / total;
    }

    for h in map.values_mut() {
        *h = frequencies[(*h as i64 - min_h as i64) as usize] as i32;
    }
    log::debug!("range adjusted {} tiles from [{}, {}] into [0, {}]", total, min_h, max_h, max_level);
}
