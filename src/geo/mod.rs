//! Placement geometry: spherical-earth navigation and the planar offsets a
//! formation layout is expressed in.

pub(crate) mod geodesy;
pub(crate) mod vec2d;
#[cfg(test)]
mod tests;

pub use geodesy::GeoPoint;
pub use vec2d::Vec2D;
