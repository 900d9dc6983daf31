use crate::bridge::{
    BridgeEvent, CorrelationId, DataPayload, InitPosition, MenuResult, ObjectHandle,
    OperatorPosition, Selection, TextKind, WaypointBatch,
};
use crate::catalog::Waypoint;
use crate::geo::GeoPoint;
use crate::menu::{MenuEntry, MenuId};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Downstream {
    #[prost(oneof = "DownstreamContent", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13")]
    pub content: Option<DownstreamContent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Upstream {
    #[prost(oneof = "UpstreamContent", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11")]
    pub content: Option<UpstreamContent>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum DownstreamContent {
    #[prost(message, tag = "1")]
    SubscribeUserPosition(SubscribeUserPosition),
    #[prost(message, tag = "2")]
    BindShortcut(BindShortcut),
    #[prost(message, tag = "3")]
    AddMenuEntry(AddMenuEntry),
    #[prost(message, tag = "4")]
    RemoveMenuEntry(RemoveMenuEntry),
    #[prost(message, tag = "5")]
    ShowMenu(ShowMenu),
    #[prost(message, tag = "6")]
    HideMenu(HideMenu),
    #[prost(message, tag = "7")]
    PrintText(PrintText),
    #[prost(message, tag = "8")]
    CreateObject(CreateObject),
    #[prost(message, tag = "9")]
    DeleteObject(DeleteObject),
    #[prost(message, tag = "10")]
    SetThrottle(SetThrottle),
    #[prost(message, tag = "11")]
    SetHeading(SetHeading),
    #[prost(message, tag = "12")]
    RequestObjectPosition(RequestObjectPosition),
    #[prost(message, tag = "13")]
    RequestWaypoints(RequestWaypoints),
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum UpstreamContent {
    #[prost(message, tag = "1")]
    Open(Open),
    #[prost(message, tag = "2")]
    Exception(Exception),
    #[prost(message, tag = "3")]
    Quit(Quit),
    #[prost(message, tag = "4")]
    MenuAnswer(MenuAnswer),
    #[prost(message, tag = "5")]
    MenuEntrySelected(MenuEntrySelected),
    #[prost(message, tag = "6")]
    ShortcutPressed(ShortcutPressed),
    #[prost(message, tag = "7")]
    HandleAssigned(HandleAssigned),
    #[prost(message, tag = "8")]
    ObjectRemoved(ObjectRemoved),
    #[prost(message, tag = "9")]
    UserPosition(UserPosition),
    #[prost(message, tag = "10")]
    ObjectPosition(ObjectPosition),
    #[prost(message, tag = "11")]
    WaypointList(WaypointList),
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct SubscribeUserPosition {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BindShortcut {
    #[prost(string, tag = "1")]
    pub key: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddMenuEntry {
    #[prost(uint32, tag = "1")]
    pub entry_id: u32,
    #[prost(string, tag = "2")]
    pub label: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct RemoveMenuEntry {
    #[prost(uint32, tag = "1")]
    pub entry_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ShowMenu {
    #[prost(uint32, tag = "1")]
    pub menu_id: u32,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub prompt: String,
    #[prost(string, repeated, tag = "4")]
    pub items: Vec<String>,
    /// Zero keeps the menu until answered.
    #[prost(float, tag = "5")]
    pub timeout_secs: f32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct HideMenu {
    #[prost(uint32, tag = "1")]
    pub menu_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PrintText {
    #[prost(enumeration = "TextStyle", tag = "1")]
    pub style: i32,
    #[prost(float, tag = "2")]
    pub duration_secs: f32,
    #[prost(string, tag = "3")]
    pub text: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateObject {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
    #[prost(string, tag = "2")]
    pub type_name: String,
    #[prost(double, tag = "3")]
    pub lat_deg: f64,
    #[prost(double, tag = "4")]
    pub lon_deg: f64,
    #[prost(double, tag = "5")]
    pub heading_deg: f64,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct DeleteObject {
    #[prost(uint32, tag = "1")]
    pub handle: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct SetThrottle {
    #[prost(uint32, tag = "1")]
    pub handle: u32,
    #[prost(uint32, tag = "2")]
    pub value: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct SetHeading {
    #[prost(uint32, tag = "1")]
    pub handle: u32,
    /// Radians, true.
    #[prost(double, tag = "2")]
    pub heading: f64,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct RequestObjectPosition {
    #[prost(uint32, tag = "1")]
    pub handle: u32,
    #[prost(uint32, tag = "2")]
    pub correlation: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct RequestWaypoints {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Open {
    #[prost(string, tag = "1")]
    pub app_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Exception {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
    #[prost(string, tag = "2")]
    pub reason: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Quit {}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct MenuAnswer {
    #[prost(uint32, tag = "1")]
    pub menu_id: u32,
    #[prost(enumeration = "MenuAnswerKind", tag = "2")]
    pub kind: i32,
    /// Zero-based line, only meaningful for `Selected`.
    #[prost(uint32, tag = "3")]
    pub slot: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct MenuEntrySelected {
    #[prost(uint32, tag = "1")]
    pub entry_id: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ShortcutPressed {}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct HandleAssigned {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
    #[prost(uint32, tag = "2")]
    pub handle: u32,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ObjectRemoved {
    #[prost(uint32, tag = "1")]
    pub handle: u32,
}

/// Radians.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct UserPosition {
    #[prost(double, tag = "1")]
    pub lat: f64,
    #[prost(double, tag = "2")]
    pub lon: f64,
    #[prost(double, tag = "3")]
    pub heading: f64,
    #[prost(double, tag = "4")]
    pub mag_var: f64,
}

/// Radians.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ObjectPosition {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
    #[prost(double, tag = "2")]
    pub lat: f64,
    #[prost(double, tag = "3")]
    pub lon: f64,
}

/// Facility coordinates come in degrees.
#[derive(Clone, PartialEq, prost::Message)]
pub struct LinkWaypoint {
    #[prost(string, tag = "1")]
    pub ident: String,
    #[prost(double, tag = "2")]
    pub lat_deg: f64,
    #[prost(double, tag = "3")]
    pub lon_deg: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct WaypointList {
    #[prost(uint32, tag = "1")]
    pub correlation: u32,
    #[prost(uint32, tag = "2")]
    pub index: u32,
    #[prost(uint32, tag = "3")]
    pub total: u32,
    #[prost(message, repeated, tag = "4")]
    pub waypoints: Vec<LinkWaypoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TextStyle {
    Info = 0,
    Error = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MenuAnswerKind {
    Selected = 0,
    Displayed = 1,
    Queued = 2,
    Removed = 3,
    Replaced = 4,
    Timeout = 5,
}

impl From<TextKind> for TextStyle {
    fn from(value: TextKind) -> Self {
        match value {
            TextKind::Info => TextStyle::Info,
            TextKind::Error => TextStyle::Error,
        }
    }
}

impl CreateObject {
    pub(crate) fn new(type_name: &str, init: &InitPosition, correlation: CorrelationId) -> Self {
        Self {
            correlation: correlation.0,
            type_name: type_name.to_string(),
            lat_deg: init.lat_deg,
            lon_deg: init.lon_deg,
            heading_deg: init.heading_deg,
        }
    }
}

impl MenuAnswer {
    fn result(self) -> Option<MenuResult> {
        Some(match MenuAnswerKind::try_from(self.kind).ok()? {
            MenuAnswerKind::Selected => MenuResult::Slot(u8::try_from(self.slot).ok()?),
            MenuAnswerKind::Displayed => MenuResult::Displayed,
            MenuAnswerKind::Queued => MenuResult::Queued,
            MenuAnswerKind::Removed => MenuResult::Removed,
            MenuAnswerKind::Replaced => MenuResult::Replaced,
            MenuAnswerKind::Timeout => MenuResult::Timeout,
        })
    }
}

impl UpstreamContent {
    /// Translates a notification from the simulator side.
    ///
    /// # Returns
    /// - `None` if the message refers to a menu, entry or answer kind this side
    ///   does not know.
    pub(crate) fn into_event(self) -> Option<BridgeEvent> {
        let event = match self {
            UpstreamContent::Open(open) => BridgeEvent::Opened { app_name: open.app_name },
            UpstreamContent::Exception(e) => {
                BridgeEvent::Exception { correlation: CorrelationId(e.correlation), reason: e.reason }
            }
            UpstreamContent::Quit(_) => BridgeEvent::Quit,
            UpstreamContent::MenuAnswer(answer) => {
                let menu = MenuId::from_repr(answer.menu_id)?;
                BridgeEvent::SelectionMade(Selection::Menu { menu, result: answer.result()? })
            }
            UpstreamContent::MenuEntrySelected(entry) => {
                BridgeEvent::SelectionMade(Selection::Entry(MenuEntry::from_repr(entry.entry_id)?))
            }
            UpstreamContent::ShortcutPressed(_) => BridgeEvent::SelectionMade(Selection::Shortcut),
            UpstreamContent::HandleAssigned(h) => BridgeEvent::HandleAssigned {
                correlation: CorrelationId(h.correlation),
                handle: ObjectHandle(h.handle),
            },
            UpstreamContent::ObjectRemoved(r) => BridgeEvent::ObjectRemoved { handle: ObjectHandle(r.handle) },
            UpstreamContent::UserPosition(p) => {
                BridgeEvent::DataReceived(DataPayload::UserPosition(OperatorPosition {
                    position: GeoPoint::new(p.lat, p.lon),
                    heading: p.heading,
                    mag_var: p.mag_var,
                }))
            }
            UpstreamContent::ObjectPosition(p) => BridgeEvent::DataReceived(DataPayload::ObjectPosition {
                correlation: CorrelationId(p.correlation),
                position: GeoPoint::new(p.lat, p.lon),
            }),
            UpstreamContent::WaypointList(list) => {
                BridgeEvent::DataReceived(DataPayload::Waypoints(WaypointBatch {
                    correlation: CorrelationId(list.correlation),
                    index: list.index,
                    total: list.total,
                    waypoints: list
                        .waypoints
                        .into_iter()
                        .map(|w| Waypoint::new(w.ident, GeoPoint::from_degrees(w.lat_deg, w.lon_deg)))
                        .collect(),
                }))
            }
        };
        Some(event)
    }
}
