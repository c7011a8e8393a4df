//! Read-only presentation content: the project catalog and the about/help payload.

/// Loaders that never fail; malformed input degrades to fallbacks.
pub mod load;
/// Serde records for projects, planets, suns and the about page.
pub mod model;
