//! The fleet session: the menu workflow that selects a formation, places it in
//! the simulator and steers the placed units, plus the bookkeeping it needs to
//! match asynchronous simulator replies to the units they concern.

mod fleet_commands;
mod fleet_session;
mod fleet_state;
mod insertion_log;
mod menu_options;
mod placement;
mod signal;

pub use fleet_session::FleetSession;
pub use fleet_state::FleetState;
pub use menu_options::{MoveCommand, PositionType, THROTTLE_MAX, throttle_value};
pub use placement::{PlacedUnit, Placement};
pub use signal::{LinkStatus, SessionSignal};
