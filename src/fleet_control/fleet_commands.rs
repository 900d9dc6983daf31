use super::fleet_session::{FLEET_POSITION_TEXT_DURATION, FleetSession};
use super::fleet_state::FleetState;
use super::menu_options::throttle_value;
use super::placement::Placement;
use crate::bridge::{
    BridgeError, CorrelationId, DataPayload, InitPosition, ObjectHandle, SimBridge, TextKind,
};
use crate::catalog::Waypoint;
use crate::geo::GeoPoint;
use crate::geo::geodesy::{meters_to_nm, normalize_heading};
use crate::{event, info, log, unit, warn};

impl<B: SimBridge> FleetSession<B> {
    /// Places the active formation and hands control to the move menu.
    pub(super) fn place_and_move(&mut self, origin: GeoPoint, heading: f64) {
        if self.insert_at(origin, heading) {
            self.change_state(FleetState::Move);
            self.show_menu();
        }
    }

    /// Creates one simulator object per member of the active formation around
    /// `origin`, all facing `heading`.
    ///
    /// Each member offset is rotated into the heading and laid out on the local
    /// tangent plane at `origin`. Every creation is recorded in the insertion
    /// log before it is sent.
    ///
    /// # Returns
    /// - `true` if at least one creation was handed to the bridge.
    pub(super) fn insert_at(&mut self, origin: GeoPoint, heading: f64) -> bool {
        let Some(len) = self.active.as_ref().map(|f| f.len()) else {
            return false;
        };
        let base = self.next_ids(len);
        let Some(formation) = self.active.as_ref() else {
            return false;
        };
        let heading = normalize_heading(heading);
        let placement = Placement::new(formation, base);

        let mut sent = 0;
        for (i, slot) in formation.members().iter().enumerate() {
            let Some(correlation) = placement.correlation_of(i) else {
                continue;
            };
            let (lat_deg, lon_deg) = origin.offset_by(slot.local_offset(), heading).to_degrees();
            let init = InitPosition { lat_deg, lon_deg, heading_deg: heading.to_degrees() };
            self.insertions.record(correlation, slot.type_name());
            match self.bridge.create_object(slot.type_name(), &init, correlation) {
                Ok(()) => {
                    unit!("Creating {} at {lat_deg:.5}, {lon_deg:.5} ({correlation})", slot.type_name());
                    sent += 1;
                }
                Err(e) => warn!("Creating {} failed: {e}", slot.type_name()),
            }
        }
        if sent == 0 {
            return false;
        }
        info!("Placed \"{}\", {sent} of {len} units requested", formation.title());
        self.heading = heading;
        self.placement = Some(placement);
        true
    }

    /// Applies `command` to every unit that currently has a handle.
    fn for_each_live(
        &mut self,
        what: &str,
        mut command: impl FnMut(&mut B, ObjectHandle) -> Result<(), BridgeError>,
    ) {
        let Some(placement) = &self.placement else {
            return;
        };
        for handle in placement.live_handles() {
            if let Err(e) = command(&mut self.bridge, handle) {
                warn!("{what} for {handle} failed: {e}");
            }
        }
    }

    pub(super) fn set_throttle(&mut self, percent: u32) {
        let value = throttle_value(percent);
        log!("Throttle {percent}% ({value})");
        self.for_each_live("Throttle", |bridge, handle| bridge.set_throttle(handle, value));
    }

    pub(super) fn turn(&mut self, degrees: f64) {
        self.heading = normalize_heading(self.heading + degrees.to_radians());
        log!("Turning {degrees:+} degrees, new heading {:.1}", self.heading.to_degrees());
        self.apply_heading();
    }

    fn apply_heading(&mut self) {
        let heading = self.heading;
        self.for_each_live("Heading", |bridge, handle| bridge.set_desired_heading(handle, heading));
    }

    /// Deletes every live unit and returns to formation selection without
    /// waiting for the removals, some handles may never be confirmed.
    pub(super) fn delete_all(&mut self) {
        self.for_each_live("Delete", |bridge, handle| bridge.delete_object(handle));
        if let Some(placement) = self.placement.take() {
            unit!("Deleting \"{}\"", placement.title());
        }
        self.active = None;
        self.change_state(FleetState::FormationSelect);
        self.show_menu();
    }

    /// Asks for the facility waypoint list. Only the reply to the latest
    /// request is accepted.
    pub(super) fn request_waypoints(&mut self) -> bool {
        let id = self.next_ids(1);
        match self.bridge.request_waypoints(id) {
            Ok(()) => {
                self.pending.waypoints = Some(id);
                true
            }
            Err(e) => {
                warn!("Requesting waypoints failed: {e}");
                false
            }
        }
    }

    /// Asks for the lead unit's position, tagging the request with a fresh id.
    fn request_lead_position(&mut self, purpose: &str) -> Option<CorrelationId> {
        let Some(lead) = self.placement.as_ref().and_then(Placement::lead_handle) else {
            log!("No live unit to {purpose}");
            return None;
        };
        let id = self.next_ids(1);
        match self.bridge.request_object_position(lead, id) {
            Ok(()) => Some(id),
            Err(e) => {
                warn!("Requesting position of {lead} failed: {e}");
                None
            }
        }
    }

    /// Remembers `waypoint` as destination and asks where the fleet is; the
    /// turn happens once the reply is in.
    ///
    /// # Returns
    /// - `false` if the position request could not be sent.
    pub(super) fn steer_to(&mut self, waypoint: Waypoint) -> bool {
        log!("Destination {}", waypoint.ident());
        self.pending.steer = self.request_lead_position("steer");
        self.destination = self.pending.steer.map(|_| waypoint);
        self.pending.steer.is_some()
    }

    pub(super) fn request_fleet_position(&mut self) {
        self.pending.locate = self.request_lead_position("locate");
    }

    pub(super) fn on_handle_assigned(&mut self, correlation: CorrelationId, handle: ObjectHandle) {
        if let Some(index) = self.placement.as_mut().and_then(|p| p.assign(correlation, handle)) {
            unit!("Unit {index} is {handle}");
            return;
        }
        // acknowledgement of a formation that was deleted in the meantime
        if let Some(type_name) = self.insertions.lookup(correlation) {
            unit!("Removing late {type_name} ({handle})");
            if let Err(e) = self.bridge.delete_object(handle) {
                warn!("Deleting {handle} failed: {e}");
            }
            return;
        }
        event!("Ignoring {handle} for unknown request {correlation}");
    }

    pub(super) fn on_object_removed(&mut self, handle: ObjectHandle) {
        let Some(placement) = self.placement.as_mut() else {
            return;
        };
        let Some(index) = placement.release(handle) else {
            return;
        };
        unit!("Unit {index} ({handle}) removed");
        if placement.live_count() == 0 {
            info!("All units of \"{}\" are gone", placement.title());
            self.placement = None;
            self.active = None;
            self.change_state(FleetState::FormationSelect);
        }
    }

    pub(super) fn on_data(&mut self, payload: DataPayload) {
        match payload {
            DataPayload::UserPosition(position) => self.operator = position,
            DataPayload::ObjectPosition { correlation, position } => {
                if self.pending.steer == Some(correlation) {
                    self.pending.steer = None;
                    self.steer_from(position);
                } else if self.pending.locate == Some(correlation) {
                    self.pending.locate = None;
                    self.report_fleet_position(position);
                } else {
                    event!("Dropping stale position reply {correlation}");
                }
            }
            DataPayload::Waypoints(batch) => {
                if self.pending.waypoints != Some(batch.correlation) {
                    event!("Dropping stale waypoint batch {}", batch.correlation);
                    return;
                }
                let operator = self.operator.position;
                if self.waypoints.ingest_batch(batch, operator) {
                    self.pending.waypoints = None;
                    self.show_menu();
                }
            }
        }
    }

    /// Points every unit from the fleet's reported position to the destination.
    fn steer_from(&mut self, fleet: GeoPoint) {
        let Some(destination) = self.destination.take() else {
            return;
        };
        self.heading = fleet.heading_to(&destination.position());
        log!("Steering to {}, heading {:.1}", destination.ident(), self.heading.to_degrees());
        self.apply_heading();
    }

    fn report_fleet_position(&mut self, fleet: GeoPoint) {
        let operator = self.operator;
        let distance = operator.position.distance_to(&fleet);
        let course = normalize_heading(operator.position.heading_to(&fleet) - operator.mag_var);
        let (lat, lon) = fleet.to_degrees();
        let text = format!(
            "Fleet is at {:.2} NM, course {:.1} degrees magnetic, position {lat:.5}, {lon:.5}",
            meters_to_nm(distance),
            course.to_degrees()
        );
        info!("{text}");
        self.notify(TextKind::Info, FLEET_POSITION_TEXT_DURATION, &text);
    }
}
