//! Palette generation algorithms.
//!
//! Everything here draws randomness from a caller-supplied RNG so a seeded
//! run is reproducible.

mod dominant;
mod gradient;
mod pool;

pub use dominant::{dominant, DEFAULT_CLUSTER_TIMEOUT};
pub use gradient::gradient;
pub use pool::{generate_from, sort_by_luminosity};
