//! Operator-facing catalogs: configured formations and simulator waypoints.

mod formation;
#[cfg(test)]
mod tests;
mod waypoint;

pub use formation::{FormationCatalog, FormationTemplate, MemberSlot, SlotParseError};
pub use waypoint::{NO_WAYPOINTS_LABEL, Waypoint, WaypointCatalog};
