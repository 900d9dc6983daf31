use crate::bridge::WaypointBatch;
use crate::geo::GeoPoint;
use crate::geo::geodesy::meters_to_nm;
use crate::menu::{ListSource, PaginatedList};

/// Shown as the only entry when the simulator reports no waypoints.
pub const NO_WAYPOINTS_LABEL: &str = "No waypoints available; display FS map to load them";

/// A named navigation point.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    ident: String,
    position: GeoPoint,
}

impl Waypoint {
    pub fn new(ident: impl Into<String>, position: GeoPoint) -> Self {
        Self { ident: ident.into(), position }
    }

    pub fn ident(&self) -> &str { &self.ident }
    pub fn position(&self) -> GeoPoint { self.position }
}

/// Waypoints reported by the simulator, ordered by distance from the operator
/// at the time the last batch arrived.
#[derive(Debug, Clone, Default)]
pub struct WaypointCatalog {
    waypoints: Vec<Waypoint>,
    origin: GeoPoint,
}

impl WaypointCatalog {
    pub fn get(&self, index: usize) -> Option<&Waypoint> { self.waypoints.get(index) }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> { self.waypoints.iter() }

    /// Point distances and bearings in the labels are measured from.
    fn finish(&mut self, origin: GeoPoint) {
        self.origin = origin;
        if self.waypoints.is_empty() {
            self.waypoints.push(Waypoint::new(NO_WAYPOINTS_LABEL, origin));
        }
        // stable, equal distances keep arrival order
        self.waypoints.sort_by(|a, b| {
            origin.distance_to(&a.position).total_cmp(&origin.distance_to(&b.position))
        });
    }
}

impl ListSource for WaypointCatalog {
    fn item_count(&self) -> usize { self.waypoints.len() }

    fn item_label(&self, index: usize) -> String {
        let Some(wp) = self.waypoints.get(index) else {
            return String::new();
        };
        let nm = meters_to_nm(self.origin.distance_to(&wp.position));
        let deg = self.origin.heading_to(&wp.position).to_degrees();
        format!("{} ({nm:.1} NM, {deg:.0} degrees)", wp.ident)
    }
}

impl PaginatedList<WaypointCatalog> {
    /// Adds one reply batch to the catalog.
    ///
    /// Batch 0 starts a new list and rewinds the page. Returns `true` once the
    /// last batch is in, the list is then sorted around `operator` and ready to
    /// be shown.
    pub fn ingest_batch(&mut self, batch: WaypointBatch, operator: GeoPoint) -> bool {
        let is_last = batch.is_last();
        if batch.is_first() {
            self.source_mut().waypoints.clear();
            self.reset_page();
        }
        self.source_mut().waypoints.extend(batch.waypoints);
        if is_last {
            self.source_mut().finish(operator);
        }
        is_last
    }
}
