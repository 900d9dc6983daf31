use super::fleet_state::FleetState;
use super::insertion_log::InsertionLog;
use super::menu_options::{MoveCommand, PositionType, option_at, option_labels};
use super::placement::Placement;
use super::signal::{LinkStatus, SessionSignal};
use crate::bridge::{
    BridgeError, BridgeEvent, CorrelationId, MenuResult, OperatorPosition, Selection, SimBridge,
    TextKind,
};
use crate::catalog::{FormationCatalog, FormationTemplate, Waypoint, WaypointCatalog};
use crate::config::BaseSettings;
use crate::geo::geodesy::nm_to_meters;
use crate::menu::{MENU_TITLE, MenuEntry, MenuId, MenuPage, PaginatedList, SlotAction};
use crate::{event, info, log, warn};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

const FORMATION_PROMPT: &str = "Select ship or ships formation:";
const POSITION_PROMPT: &str = "Select position type";
const WAYPOINT_PROMPT: &str = "Select waypoint";
const REQUEST_POSITION_LABEL: &str = "Request position";

const LIST_MENU_TIMEOUT: Duration = Duration::from_secs(15);
const MOVE_MENU_TIMEOUT: Duration = Duration::from_secs(5);
const POSITION_MENU_TIMEOUT: Duration = Duration::ZERO;
pub(super) const ERROR_TEXT_DURATION: Duration = Duration::from_secs(8);
pub(super) const FLEET_POSITION_TEXT_DURATION: Duration = Duration::from_secs(15);

/// Latest id of each outstanding request kind. A reply carrying any other id
/// belongs to a superseded request and is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct PendingRequests {
    pub(super) waypoints: Option<CorrelationId>,
    pub(super) steer: Option<CorrelationId>,
    pub(super) locate: Option<CorrelationId>,
}

/// The menu-driven fleet coordinator.
///
/// Owns the workflow state, the formation in use and its placed units. Every
/// [`BridgeEvent`] is handled to completion before the next one is looked at,
/// so none of the handlers ever wait on the simulator.
pub struct FleetSession<B: SimBridge> {
    pub(super) bridge: B,
    pub(super) settings: BaseSettings,
    pub(super) state: FleetState,
    pub(super) formations: PaginatedList<FormationCatalog>,
    pub(super) waypoints: PaginatedList<WaypointCatalog>,
    pub(super) active: Option<FormationTemplate>,
    pub(super) placement: Option<Placement>,
    /// Fleet heading, radians in `[0, 2π)`.
    pub(super) heading: f64,
    pub(super) destination: Option<Waypoint>,
    pub(super) operator: OperatorPosition,
    pub(super) insertions: InsertionLog,
    pub(super) pending: PendingRequests,
    next_correlation: u32,
    displayed: Option<MenuId>,
    position_entry: bool,
    status: watch::Sender<LinkStatus>,
}

impl<B: SimBridge> FleetSession<B> {
    pub fn new(
        bridge: B,
        formations: FormationCatalog,
        settings: BaseSettings,
        status: watch::Sender<LinkStatus>,
    ) -> Self {
        Self {
            bridge,
            settings,
            state: FleetState::FormationSelect,
            formations: PaginatedList::new(
                formations,
                MenuId::Formations,
                FORMATION_PROMPT,
                LIST_MENU_TIMEOUT,
            ),
            waypoints: PaginatedList::new(
                WaypointCatalog::default(),
                MenuId::Waypoints,
                WAYPOINT_PROMPT,
                LIST_MENU_TIMEOUT,
            ),
            active: None,
            placement: None,
            heading: 0.0,
            destination: None,
            operator: OperatorPosition::default(),
            insertions: InsertionLog::new(),
            pending: PendingRequests::default(),
            next_correlation: 1,
            displayed: None,
            position_entry: false,
            status,
        }
    }

    pub fn state(&self) -> FleetState { self.state }
    pub fn heading(&self) -> f64 { self.heading }
    pub fn placement(&self) -> Option<&Placement> { self.placement.as_ref() }
    pub fn active_formation(&self) -> Option<&FormationTemplate> { self.active.as_ref() }
    pub fn operator(&self) -> OperatorPosition { self.operator }
    pub fn displayed_menu(&self) -> Option<MenuId> { self.displayed }
    pub fn bridge(&self) -> &B { &self.bridge }
    pub fn bridge_mut(&mut self) -> &mut B { &mut self.bridge }

    /// Consumes bridge events until the simulator quits, the channel closes or
    /// `cancel` fires.
    pub async fn run(&mut self, events: &mut mpsc::Receiver<BridgeEvent>, cancel: CancellationToken) {
        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => {
                    info!("Fleet session cancelled");
                    break;
                }
                next = events.recv() => next,
            };
            let Some(bridge_event) = next else {
                log!("Bridge event channel closed");
                self.status.send_replace(LinkStatus::Disconnected);
                break;
            };
            if self.handle_event(bridge_event) == SessionSignal::Exit {
                break;
            }
        }
    }

    pub fn handle_event(&mut self, bridge_event: BridgeEvent) -> SessionSignal {
        event!("{bridge_event:?}");
        match bridge_event {
            BridgeEvent::Opened { app_name } => self.on_open(&app_name),
            BridgeEvent::Exception { correlation, reason } => self.on_exception(correlation, &reason),
            BridgeEvent::Quit => {
                info!("Simulator quit, disconnecting");
                self.status.send_replace(LinkStatus::Disconnected);
                return SessionSignal::Exit;
            }
            BridgeEvent::SelectionMade(selection) => self.on_selection(selection),
            BridgeEvent::HandleAssigned { correlation, handle } => {
                self.on_handle_assigned(correlation, handle);
            }
            BridgeEvent::ObjectRemoved { handle } => self.on_object_removed(handle),
            BridgeEvent::DataReceived(payload) => self.on_data(payload),
        }
        SessionSignal::Continue
    }

    fn on_open(&mut self, app_name: &str) {
        info!("Connected to {app_name}");
        match self.register_title_menu() {
            Ok(()) => {
                self.status.send_replace(LinkStatus::Connected(app_name.to_string()));
            }
            Err(e) => warn!("Setting up the simulator menu failed: {e}"),
        }
    }

    fn register_title_menu(&mut self) -> Result<(), BridgeError> {
        let key = self.settings.menu_shortcut().to_string();
        self.bridge.subscribe_user_position()?;
        self.bridge.bind_shortcut(&key)?;
        self.bridge.add_menu_entry(MenuEntry::Title, MENU_TITLE)?;
        self.bridge.add_menu_entry(MenuEntry::ShowHide, &format!("Show/hide menu ({key})"))
    }

    fn on_exception(&mut self, correlation: CorrelationId, reason: &str) {
        let message = match self.insertions.lookup(correlation) {
            Some(type_name) => format!("Error inserting object \"{type_name}\": {reason}"),
            None => format!("Simulator reported an error: {reason}"),
        };
        warn!("{message}");
        self.notify(TextKind::Error, ERROR_TEXT_DURATION, &message);
    }

    fn on_selection(&mut self, selection: Selection) {
        match selection {
            Selection::Shortcut | Selection::Entry(MenuEntry::ShowHide) => self.toggle_menu(),
            Selection::Entry(MenuEntry::RequestPosition) => self.request_fleet_position(),
            Selection::Entry(MenuEntry::Title) => (),
            Selection::Menu { menu, result } => self.on_menu_result(menu, result),
        }
    }

    fn on_menu_result(&mut self, menu: MenuId, result: MenuResult) {
        self.displayed = (result == MenuResult::Displayed).then_some(menu);
        let MenuResult::Slot(slot) = result else {
            return;
        };
        if menu != self.state.menu() {
            event!("Ignoring selection in {menu} while in {}", self.state);
            return;
        }
        let slot = usize::from(slot);
        match self.state {
            FleetState::FormationSelect => self.select_formation(slot),
            FleetState::PositionTypeSelect => self.select_position_type(slot),
            FleetState::WaypointSelect | FleetState::DestinationWaypointSelect => {
                self.select_waypoint(slot);
            }
            FleetState::Move => self.select_move(slot),
        }
    }

    fn select_formation(&mut self, slot: usize) {
        match self.formations.select(slot) {
            SlotAction::PreviousPage | SlotAction::NextPage => self.show_menu(),
            SlotAction::Selected(index) => {
                let Some(formation) = self.formations.source().get(index) else {
                    return;
                };
                if formation.is_empty() {
                    log!("\"{}\" has no units to place", formation.title());
                    return;
                }
                info!("Formation \"{}\" selected", formation.title());
                self.active = Some(formation.clone());
                self.change_state(FleetState::PositionTypeSelect);
                self.show_menu();
            }
            SlotAction::Ignored => (),
        }
    }

    fn select_position_type(&mut self, slot: usize) {
        let Some(option) = option_at::<PositionType>(slot) else {
            return;
        };
        let operator = self.operator;
        if let Some(nm) = option.ahead_nm() {
            let target = operator.position.project(nm_to_meters(nm), operator.heading);
            self.place_and_move(target, operator.heading);
            return;
        }
        match option {
            PositionType::UserPosition => self.place_and_move(operator.position, operator.heading),
            PositionType::FacilityWaypoint => {
                if self.request_waypoints() {
                    self.change_state(FleetState::WaypointSelect);
                }
            }
            PositionType::Return => {
                self.active = None;
                self.change_state(FleetState::FormationSelect);
                self.show_menu();
            }
            PositionType::OneNmAhead | PositionType::FiveNmAhead | PositionType::TenNmAhead => (),
        }
    }

    fn select_waypoint(&mut self, slot: usize) {
        match self.waypoints.select(slot) {
            SlotAction::PreviousPage | SlotAction::NextPage => self.show_menu(),
            SlotAction::Selected(index) => {
                let Some(waypoint) = self.waypoints.source().get(index).cloned() else {
                    return;
                };
                if self.state == FleetState::WaypointSelect {
                    let heading = self.operator.heading;
                    self.place_and_move(waypoint.position(), heading);
                } else if self.steer_to(waypoint) {
                    self.change_state(FleetState::Move);
                    self.show_menu();
                }
            }
            SlotAction::Ignored => (),
        }
    }

    fn select_move(&mut self, slot: usize) {
        let Some(command) = option_at::<MoveCommand>(slot) else {
            return;
        };
        if self.placement.is_none() {
            return;
        }
        if let Some(degrees) = command.turn_degrees() {
            self.turn(degrees);
            return;
        }
        match command {
            MoveCommand::Forward => self.set_throttle(self.settings.throttle_percent()),
            MoveCommand::FullStop => self.set_throttle(0),
            MoveCommand::MoveToWaypoint => {
                if self.request_waypoints() {
                    self.change_state(FleetState::DestinationWaypointSelect);
                }
            }
            MoveCommand::Delete => self.delete_all(),
            MoveCommand::CloseWindow
            | MoveCommand::TurnLeft10
            | MoveCommand::TurnRight10
            | MoveCommand::TurnLeft90
            | MoveCommand::TurnRight90 => (),
        }
    }

    /// Hides the menu on screen, or shows the current state's menu if none is.
    fn toggle_menu(&mut self) {
        match self.displayed.take() {
            Some(menu) => {
                if let Err(e) = self.bridge.hide_menu(menu) {
                    warn!("Hiding {menu} failed: {e}");
                }
            }
            None => self.show_menu(),
        }
    }

    pub(super) fn show_menu(&mut self) {
        let page = match self.state {
            FleetState::FormationSelect => self.formations.render(),
            FleetState::PositionTypeSelect => MenuPage::fixed(
                MenuId::PositionTypes,
                POSITION_PROMPT,
                option_labels::<PositionType>(),
                POSITION_MENU_TIMEOUT,
            ),
            FleetState::WaypointSelect | FleetState::DestinationWaypointSelect => {
                self.waypoints.render()
            }
            FleetState::Move => {
                let title = self.placement.as_ref().map_or("", Placement::title);
                MenuPage::fixed(
                    MenuId::Moves,
                    format!("Moves ({title}) : "),
                    option_labels::<MoveCommand>(),
                    MOVE_MENU_TIMEOUT,
                )
            }
        };
        if let Err(e) =
            self.bridge.show_menu(page.menu, MENU_TITLE, &page.prompt, &page.lines, page.timeout)
        {
            warn!("Showing {} failed: {e}", page.menu);
        }
    }

    /// Switches state and keeps the "Request position" entry registered exactly
    /// while a formation is out.
    pub(super) fn change_state(&mut self, new: FleetState) {
        let old = self.state;
        if old == new {
            return;
        }
        self.state = new;
        log!("{old} -> {new}");

        if new.menu() != MenuId::Waypoints {
            self.pending.waypoints = None;
        }
        if !new.has_placement() {
            self.pending.steer = None;
            self.pending.locate = None;
            self.destination = None;
        }
        if new.has_placement() && !self.position_entry {
            match self.bridge.add_menu_entry(MenuEntry::RequestPosition, REQUEST_POSITION_LABEL) {
                Ok(()) => self.position_entry = true,
                Err(e) => warn!("Adding \"{REQUEST_POSITION_LABEL}\" failed: {e}"),
            }
        } else if !new.has_placement() && self.position_entry {
            match self.bridge.remove_menu_entry(MenuEntry::RequestPosition) {
                Ok(()) => self.position_entry = false,
                Err(e) => warn!("Removing \"{REQUEST_POSITION_LABEL}\" failed: {e}"),
            }
        }
    }

    /// Hands out `count` consecutive correlation ids.
    pub(super) fn next_ids(&mut self, count: usize) -> CorrelationId {
        let base = CorrelationId(self.next_correlation);
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.next_correlation = self.next_correlation.wrapping_add(count.max(1));
        base
    }

    pub(super) fn notify(&mut self, kind: TextKind, duration: Duration, text: &str) {
        if let Err(e) = self.bridge.print_text(kind, duration, text) {
            warn!("Printing \"{text}\" failed: {e}");
        }
    }
}
