use super::{CorrelationId, ObjectHandle};
use crate::catalog::Waypoint;
use crate::geo::GeoPoint;
use crate::menu::{MenuEntry, MenuId};

/// Everything the simulator can tell the fleet session, delivered one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// The connection is up, `app_name` is the simulator's display name.
    Opened { app_name: String },
    /// A previously sent command failed.
    Exception { correlation: CorrelationId, reason: String },
    /// The simulator is going away.
    Quit,
    SelectionMade(Selection),
    HandleAssigned { correlation: CorrelationId, handle: ObjectHandle },
    ObjectRemoved { handle: ObjectHandle },
    DataReceived(DataPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Outcome of a menu shown with [`super::SimBridge::show_menu`].
    Menu { menu: MenuId, result: MenuResult },
    /// A title menu entry was clicked.
    Entry(MenuEntry),
    /// The bound keyboard shortcut was pressed.
    Shortcut,
}

/// What became of a shown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResult {
    /// The operator picked the line at this zero-based position.
    Slot(u8),
    Displayed,
    Queued,
    Removed,
    Replaced,
    Timeout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataPayload {
    UserPosition(OperatorPosition),
    ObjectPosition { correlation: CorrelationId, position: GeoPoint },
    Waypoints(WaypointBatch),
}

/// Position of the operator's own aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperatorPosition {
    pub position: GeoPoint,
    /// True heading, radians.
    pub heading: f64,
    /// Magnetic variation, radians, east positive.
    pub mag_var: f64,
}

/// One chunk of a waypoint list reply.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointBatch {
    pub correlation: CorrelationId,
    pub index: u32,
    pub total: u32,
    pub waypoints: Vec<Waypoint>,
}

impl WaypointBatch {
    pub fn is_first(&self) -> bool { self.index == 0 }

    pub fn is_last(&self) -> bool { self.index.saturating_add(1) >= self.total }
}
