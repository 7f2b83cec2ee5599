//! Height map generation library
//!
//! Builds integer elevation fields over wrapping tile grids, either from
//! smoothed white noise or by fractal midpoint displacement, with pole bias
//! and a flatness classifier for later terrain passes.

pub mod error;
pub mod flatness;
pub mod fractal;
pub mod heightmap;
pub mod noise_field;
pub mod normalize;
pub mod poles;
pub mod random;
pub mod session;
pub mod settings;
pub mod smooth;
pub mod tilemap;
pub mod topology;

pub use error::{GenerationError, Result};
pub use heightmap::{HeightLevels, HeightMap};
pub use random::{RandomSource, SeededRandom};
pub use session::{BiasedHeightMap, FinishedHeightMap, HeightGenerator, HeightMapSession};
pub use settings::GeneratorSettings;
pub use topology::Topology;
