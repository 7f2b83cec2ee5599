//! Grid topology: native addressing, wraparound, colatitude and
//! topological singularities.
//!
//! Native coordinates run `0..width` by `0..height` and map to the linear
//! index `y * width + x`. Either axis may wrap; a map wrapping only in x is
//! a cylinder, one wrapping in both is a torus.

use crate::error::{GenerationError, Result};
use crate::settings::{GeneratorSettings, MAX_COLATITUDE};

#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub width: usize,
    pub height: usize,
    pub wrap_x: bool,
    pub wrap_y: bool,
    all_temperate: bool,
    singularity_radius: usize,
}

impl Topology {
    /// Create a topology. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize, wrap_x: bool, wrap_y: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GenerationError::InvalidGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            wrap_x,
            wrap_y,
            all_temperate: false,
            singularity_radius: 2,
        })
    }

    /// Apply the climate and edge settings that shape colatitude and
    /// singularity queries.
    pub fn with_settings(mut self, settings: &GeneratorSettings) -> Self {
        self.all_temperate = settings.all_temperate;
        self.singularity_radius = settings.singularity_radius;
        self
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }

    pub fn index_to_native(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Resolve signed native coordinates to a tile index.
    ///
    /// Wrapping axes wrap (so `x == width` resolves to column 0);
    /// out-of-range coordinates on a non-wrapping axis give `None`.
    pub fn native_index(&self, x: i64, y: i64) -> Option<usize> {
        let x = wrap_axis(x, self.width, self.wrap_x)?;
        let y = wrap_axis(y, self.height, self.wrap_y)?;
        Some(y * self.width + x)
    }

    /// The tile `offset` steps away along one axis.
    pub fn axis_neighbor(&self, x: usize, y: usize, offset: i64, horizontal: bool) -> Option<usize> {
        if horizontal {
            self.native_index(x as i64 + offset, y as i64)
        } else {
            self.native_index(x as i64, y as i64 + offset)
        }
    }

    /// Colatitude of a tile in `[0, MAX_COLATITUDE]`; 0 at a pole.
    pub fn colatitude(&self, index: usize) -> i32 {
        if self.all_temperate {
            return MAX_COLATITUDE / 2;
        }
        let (x, y) = self.index_to_native(index);
        match (self.wrap_x, self.wrap_y) {
            (true, true) => seam_colatitude(y, self.height),
            (false, true) => edge_colatitude(x, self.width),
            _ => edge_colatitude(y, self.height),
        }
    }

    /// Whether a tile sits close enough to a non-wrapping edge that its
    /// neighbourhood degenerates.
    pub fn near_singularity(&self, index: usize) -> bool {
        let (x, y) = self.index_to_native(index);
        let r = self.singularity_radius;
        (!self.wrap_x && (x < r || x + r >= self.width))
            || (!self.wrap_y && (y < r || y + r >= self.height))
    }

    /// Every distinct tile within `radius` on both axes, paired with its
    /// Manhattan distance from the centre. The centre is included at
    /// distance 0.
    pub fn square_neighborhood(&self, index: usize, radius: usize) -> Vec<(usize, usize)> {
        let (cx, cy) = self.index_to_native(index);
        let r = radius as i64;
        let mut result: Vec<(usize, usize)> = Vec::with_capacity((2 * radius + 1).pow(2));

        for dy in -r..=r {
            for dx in -r..=r {
                let Some(tile) = self.native_index(cx as i64 + dx, cy as i64 + dy) else {
                    continue;
                };
                let dist = (dx.abs() + dy.abs()) as usize;
                // Small wrapped maps can reach one tile through two offsets
                match result.iter_mut().find(|(t, _)| *t == tile) {
                    Some(entry) => entry.1 = entry.1.min(dist),
                    None => result.push((tile, dist)),
                }
            }
        }

        result
    }
}

fn wrap_axis(pos: i64, len: usize, wraps: bool) -> Option<usize> {
    let len = len as i64;
    if wraps {
        Some(pos.rem_euclid(len) as usize)
    } else if (0..len).contains(&pos) {
        Some(pos as usize)
    } else {
        None
    }
}

/// Poles at both ends of a non-wrapping axis, equator in the middle.
fn edge_colatitude(pos: usize, len: usize) -> i32 {
    if len <= 1 {
        return MAX_COLATITUDE;
    }
    let from_edge = pos.min(len - 1 - pos) as f64;
    let half = (len - 1) as f64 / 2.0;
    ((MAX_COLATITUDE as f64 * from_edge / half).round() as i32).min(MAX_COLATITUDE)
}

/// A single polar seam at position 0 of a wrapping axis.
fn seam_colatitude(pos: usize, len: usize) -> i32 {
    if len <= 1 {
        return MAX_COLATITUDE;
    }
    let from_seam = pos.min(len - pos) as f64;
    let half = len as f64 / 2.0;
    ((MAX_COLATITUDE as f64 * from_seam / half).round() as i32).min(MAX_COLATITUDE)
}
