//! The simulator bridge as seen by the fleet session: a set of fire-and-forget
//! commands ([`SimBridge`]) and the notifications that come back later
//! ([`BridgeEvent`]), matched up through [`CorrelationId`]s.

mod bridge_error;
mod bridge_event;

pub use bridge_error::BridgeError;
pub use bridge_event::{
    BridgeEvent, DataPayload, MenuResult, OperatorPosition, Selection, WaypointBatch,
};

use crate::menu::{MenuEntry, MenuId};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Identifier attached to an outgoing asynchronous command and echoed back on
/// its reply, its handle assignment or its failure notification.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct CorrelationId(pub u32);

impl CorrelationId {
    /// The `n`-th id after this one.
    pub fn offset(self, n: usize) -> Option<CorrelationId> {
        u32::try_from(n).ok().and_then(|n| self.0.checked_add(n)).map(CorrelationId)
    }

    /// Position of `self` in the block of `len` ids starting at `base`.
    pub fn index_from(self, base: CorrelationId, len: usize) -> Option<usize> {
        let idx = usize::try_from(self.0.checked_sub(base.0)?).ok()?;
        (idx < len).then_some(idx)
    }
}

impl Display for CorrelationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// Object id the simulator assigns to a created object.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ObjectHandle(pub u32);

impl Display for ObjectHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "obj {}", self.0) }
}

/// Initial placement of a created object, in the units the simulator expects.
/// Objects are always created on the surface and at rest.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct InitPosition {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub heading_deg: f64,
}

/// Style of an operator-visible text line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextKind {
    Info,
    Error,
}

/// Commands the fleet session can issue to the simulator.
///
/// Every call returns as soon as the command is handed over. A returned error
/// means the command was not sent; anything that goes wrong later arrives as a
/// [`BridgeEvent::Exception`].
pub trait SimBridge {
    /// Subscribes to [`DataPayload::UserPosition`] updates.
    fn subscribe_user_position(&mut self) -> Result<(), BridgeError>;
    /// Maps a keyboard shortcut to [`Selection::Shortcut`].
    fn bind_shortcut(&mut self, key: &str) -> Result<(), BridgeError>;
    fn add_menu_entry(&mut self, entry: MenuEntry, label: &str) -> Result<(), BridgeError>;
    fn remove_menu_entry(&mut self, entry: MenuEntry) -> Result<(), BridgeError>;
    /// Shows a one-shot choice menu, its outcome comes back as [`Selection::Menu`].
    /// A zero `timeout` keeps the menu up until the operator answers.
    fn show_menu(
        &mut self,
        menu: MenuId,
        title: &str,
        prompt: &str,
        items: &[String],
        timeout: Duration,
    ) -> Result<(), BridgeError>;
    fn hide_menu(&mut self, menu: MenuId) -> Result<(), BridgeError>;
    fn print_text(&mut self, kind: TextKind, duration: Duration, text: &str) -> Result<(), BridgeError>;
    fn create_object(
        &mut self,
        type_name: &str,
        init: &InitPosition,
        correlation: CorrelationId,
    ) -> Result<(), BridgeError>;
    fn delete_object(&mut self, handle: ObjectHandle) -> Result<(), BridgeError>;
    /// Sets the throttle lever, `0..=16383`.
    fn set_throttle(&mut self, handle: ObjectHandle, value: u32) -> Result<(), BridgeError>;
    fn set_desired_heading(&mut self, handle: ObjectHandle, heading: f64) -> Result<(), BridgeError>;
    fn request_object_position(
        &mut self,
        handle: ObjectHandle,
        correlation: CorrelationId,
    ) -> Result<(), BridgeError>;
    /// Requests the facility waypoint list, delivered in [`WaypointBatch`]es.
    fn request_waypoints(&mut self, correlation: CorrelationId) -> Result<(), BridgeError>;
}
