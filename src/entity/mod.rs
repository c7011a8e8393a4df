//! Circular hit targets with eased hover radii.

/// Galaxy center ("black hole") target.
pub mod galaxy_center;
/// Shared hover easing state.
pub mod hover;
/// Orbiting planets.
pub mod planet;
/// Project stars in the galaxy.
pub mod star_system;
