/// Straight-alpha colors and CSS color parsing.
pub mod color;
/// Viewport and geometry re-exports.
pub mod core;
/// Crate error type.
pub mod error;
/// Small numeric helpers.
pub mod math;
/// Seeded random numbers.
pub mod rng;
