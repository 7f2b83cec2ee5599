//! Fractal height generation by recursive midpoint displacement.
//!
//! The map is cut into a regular grid of blocks whose corners get random
//! seed heights. Each block is then subdivided: edge midpoints and the
//! centre take the average of their corners plus a random offset whose
//! amplitude shrinks by 2/3 at every level. Blocks sharing an edge share
//! its midpoints, so every tile is written at most once.
//!
//! On a wrapping axis the last block's far edge sits at `width` (or
//! `height`), which resolves to column (or row) 0.

use crate::error::{GenerationError, Result};
use crate::heightmap::HeightMap;
use crate::normalize::adjust_range;
use crate::random::RandomSource;
use crate::settings::GeneratorSettings;
use crate::tilemap::Tilemap;
use crate::topology::Topology;

/// Blocks per axis before any extra subdivision
const BASE_DIVISIONS: i64 = 5;

/// Contrast multiplier applied after subdivision
const EXAGGERATION: i32 = 8;

/// Shortest non-wrapping axis the block grid can fill completely
pub const MIN_FLAT_AXIS: usize = 3;

// =============================================================================
// PUBLIC ENTRY POINTS
// =============================================================================

/// Generate an earthlike height field in `[0, max_level]`.
///
/// `extra_subdivision` adds blocks on both axes, giving more and smaller
/// landmasses. Non-wrapping axes need at least [`MIN_FLAT_AXIS`] tiles.
pub fn generate_fractal_field<R: RandomSource>(
    topology: &Topology,
    settings: &GeneratorSettings,
    extra_subdivision: u32,
    rng: &mut R,
) -> Result<HeightMap> {
    let mut map = midpoint_displacement(topology, settings, extra_subdivision, rng)?;

    for h in map.values_mut() {
        *h = EXAGGERATION * *h + rng.uniform(4) - 2;
    }

    adjust_range(&mut map);
    Ok(map)
}

/// Raw displacement output before exaggeration and range adjustment.
pub fn midpoint_displacement<R: RandomSource>(
    topology: &Topology,
    settings: &GeneratorSettings,
    extra_subdivision: u32,
    rng: &mut R,
) -> Result<HeightMap> {
    check_grid(topology)?;
    Ok(displace(topology, settings, extra_subdivision, rng).heights)
}

/// A non-wrapping axis of one or two tiles collapses the block grid and
/// leaves tiles that no block reaches.
fn check_grid(topology: &Topology) -> Result<()> {
    let too_short = |len: usize, wraps: bool| !wraps && len < MIN_FLAT_AXIS;
    if too_short(topology.width, topology.wrap_x) || too_short(topology.height, topology.wrap_y) {
        return Err(GenerationError::GridTooSmall {
            width: topology.width,
            height: topology.height,
            min: MIN_FLAT_AXIS,
        });
    }
    Ok(())
}

fn displace<'a, R: RandomSource>(
    topology: &'a Topology,
    settings: &'a GeneratorSettings,
    extra_subdivision: u32,
    rng: &mut R,
) -> Canvas<'a> {
    let layout = BlockLayout::new(topology, extra_subdivision);
    // Only needs to exceed log2 of the grid size for the recursion to bottom out
    let step = (topology.width + topology.height) as i32;

    let mut canvas = Canvas::new(topology, settings);
    canvas.seed_corners(&layout, step, rng);
    for xn in 0..layout.xdiv {
        for yn in 0..layout.ydiv {
            canvas.subdivide(layout.block(xn, yn), step, rng);
        }
    }

    log::debug!(
        "midpoint displacement: {}x{} blocks, {} of {} tiles set",
        layout.xdiv,
        layout.ydiv,
        canvas.set_count(),
        topology.tile_count()
    );
    canvas
}

/// Downward bias for seed corners at singularities; weaker as the target
/// land share grows.
pub fn avoid_edge(step: i32, land_percent: i32) -> i32 {
    (100 - land_percent) * step / 100 + step / 3
}

// =============================================================================
// BLOCK LAYOUT
// =============================================================================

/// Rectangle in native coordinates. `xr`/`yb` may equal the grid extent on
/// a wrapping axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub xl: i64,
    pub yt: i64,
    pub xr: i64,
    pub yb: i64,
}

impl Rect {
    /// No interior points left to fill.
    fn is_leaf(&self) -> bool {
        let w = self.xr - self.xl;
        let h = self.yb - self.yt;
        w <= 0 || h <= 0 || (w == 1 && h == 1)
    }

    fn quadrants(&self) -> [Rect; 4] {
        let xm = (self.xl + self.xr) / 2;
        let ym = (self.yt + self.yb) / 2;
        [
            Rect { xl: self.xl, yt: self.yt, xr: xm, yb: ym },
            Rect { xl: self.xl, yt: ym, xr: xm, yb: self.yb },
            Rect { xl: xm, yt: self.yt, xr: self.xr, yb: ym },
            Rect { xl: xm, yt: ym, xr: self.xr, yb: self.yb },
        ]
    }
}

#[derive(Clone, Copy, Debug)]
struct BlockLayout {
    xdiv: i64,
    ydiv: i64,
    /// Corner rows/columns; one more than the block count on a
    /// non-wrapping axis, which needs its closing edge.
    xdiv2: i64,
    ydiv2: i64,
    xmax: i64,
    ymax: i64,
}

impl BlockLayout {
    fn new(topology: &Topology, extra_subdivision: u32) -> Self {
        let xnowrap = (!topology.wrap_x) as i64;
        let ynowrap = (!topology.wrap_y) as i64;
        let xdiv = BASE_DIVISIONS + extra_subdivision as i64;
        let ydiv = BASE_DIVISIONS + extra_subdivision as i64;

        Self {
            xdiv,
            ydiv,
            xdiv2: xdiv + xnowrap,
            ydiv2: ydiv + ynowrap,
            xmax: topology.width as i64 - xnowrap,
            ymax: topology.height as i64 - ynowrap,
        }
    }

    fn corner(&self, xn: i64, yn: i64) -> (i64, i64) {
        (xn * self.xmax / self.xdiv, yn * self.ymax / self.ydiv)
    }

    fn block(&self, xn: i64, yn: i64) -> Rect {
        let (xl, yt) = self.corner(xn, yn);
        let (xr, yb) = self.corner(xn + 1, yn + 1);
        Rect { xl, yt, xr, yb }
    }
}

// =============================================================================
// CANVAS
// =============================================================================

/// Field under construction plus a per-tile written marker.
struct Canvas<'a> {
    topology: &'a Topology,
    settings: &'a GeneratorSettings,
    heights: HeightMap,
    written: Tilemap<bool>,
}

impl<'a> Canvas<'a> {
    fn new(topology: &'a Topology, settings: &'a GeneratorSettings) -> Self {
        Self {
            topology,
            settings,
            heights: HeightMap::new(topology, settings.max_level),
            written: Tilemap::new_with(topology.width, topology.height, false),
        }
    }

    fn write(&mut self, index: usize, value: i32) {
        self.heights.set(index, value);
        self.written.set_index(index, true);
    }

    fn is_written(&self, index: usize) -> bool {
        *self.written.get_index(index)
    }

    fn set_count(&self) -> usize {
        self.written.as_slice().iter().filter(|&&w| w).count()
    }

    fn is_near_pole(&self, index: usize) -> bool {
        self.topology.colatitude(index) <= self.settings.ice_base_level / 2
    }

    /// Height at native coordinates; unwritten tiles read as 0.
    fn height_at(&self, x: i64, y: i64) -> i32 {
        self.topology.native_index(x, y).map_or(0, |i| self.heights.get(i))
    }

    fn seed_corners<R: RandomSource>(&mut self, layout: &BlockLayout, step: i32, rng: &mut R) {
        let avoidedge = avoid_edge(step, self.settings.land_percent);

        for xn in 0..layout.xdiv2 {
            for yn in 0..layout.ydiv2 {
                let (x, y) = layout.corner(xn, yn);
                let Some(index) = self.topology.native_index(x, y) else {
                    continue;
                };
                // Small grids repeat corner positions
                if self.is_written(index) {
                    continue;
                }

                let mut h = rng.uniform(2 * step) - step;
                if self.topology.near_singularity(index) {
                    h -= avoidedge;
                }
                if self.is_near_pole(index) {
                    h -= rng.uniform(avoidedge * self.settings.flat_poles / 100);
                }
                self.write(index, h);
            }
        }
    }

    fn set_midpoint(&mut self, x: i64, y: i64, value: i32) {
        let Some(index) = self.topology.native_index(x, y) else {
            return;
        };
        if self.is_written(index) {
            return;
        }
        if self.is_near_pole(index) {
            self.write(index, value * (100 - self.settings.flat_poles) / 100);
        } else if !self.topology.near_singularity(index) {
            self.write(index, value);
        }
    }

    fn subdivide<R: RandomSource>(&mut self, rect: Rect, step: i32, rng: &mut R) {
        if rect.is_leaf() {
            return;
        }

        let Rect { xl, yt, xr, yb } = rect;
        let xm = (xl + xr) / 2;
        let ym = (yt + yb) / 2;

        let v00 = self.height_at(xl, yt);
        let v01 = self.height_at(xl, yb);
        let v10 = self.height_at(xr, yt);
        let v11 = self.height_at(xr, yb);

        self.set_midpoint(xm, yt, (v00 + v10) / 2 + perturb(step, rng));
        self.set_midpoint(xm, yb, (v01 + v11) / 2 + perturb(step, rng));
        self.set_midpoint(xl, ym, (v00 + v01) / 2 + perturb(step, rng));
        self.set_midpoint(xr, ym, (v10 + v11) / 2 + perturb(step, rng));
        self.set_midpoint(xm, ym, (v00 + v01 + v10 + v11) / 4 + perturb(step, rng));

        let next = 2 * step / 3;
        for quadrant in rect.quadrants() {
            self.subdivide(quadrant, next, rng);
        }
    }
}

/// Random offset in `[-step/2, step/2)`.
fn perturb<R: RandomSource>(step: i32, rng: &mut R) -> i32 {
    rng.uniform(step) - step / 2
}
