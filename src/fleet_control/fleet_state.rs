use crate::menu::MenuId;
use strum_macros::Display;

/// Where the operator is in the placement workflow.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum FleetState {
    #[default]
    FormationSelect,
    PositionTypeSelect,
    WaypointSelect,
    Move,
    DestinationWaypointSelect,
}

impl FleetState {
    /// The menu shown while in this state.
    pub fn menu(self) -> MenuId {
        match self {
            FleetState::FormationSelect => MenuId::Formations,
            FleetState::PositionTypeSelect => MenuId::PositionTypes,
            FleetState::WaypointSelect | FleetState::DestinationWaypointSelect => MenuId::Waypoints,
            FleetState::Move => MenuId::Moves,
        }
    }

    /// Whether a formation is out in the simulator in this state.
    pub fn has_placement(self) -> bool {
        matches!(self, FleetState::Move | FleetState::DestinationWaypointSelect)
    }
}
