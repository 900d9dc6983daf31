use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Throttle lever range of the simulator.
pub const THROTTLE_MAX: u32 = 16383;

/// Options of the position type menu, in display order.
#[derive(Debug, Display, EnumIter, PartialEq, Eq, Clone, Copy)]
pub enum PositionType {
    #[strum(to_string = "User position")]
    UserPosition,
    #[strum(to_string = "1 nm ahead")]
    OneNmAhead,
    #[strum(to_string = "5 nm ahead")]
    FiveNmAhead,
    #[strum(to_string = "10 nm ahead")]
    TenNmAhead,
    #[strum(to_string = "Facility waypoint")]
    FacilityWaypoint,
    Return,
}

impl PositionType {
    /// Distance ahead of the operator, nautical miles, for the "ahead" options.
    pub fn ahead_nm(self) -> Option<f64> {
        match self {
            PositionType::OneNmAhead => Some(1.0),
            PositionType::FiveNmAhead => Some(5.0),
            PositionType::TenNmAhead => Some(10.0),
            _ => None,
        }
    }
}

/// Options of the move menu, in display order.
#[derive(Debug, Display, EnumIter, PartialEq, Eq, Clone, Copy)]
pub enum MoveCommand {
    Forward,
    #[strum(to_string = "Full stop")]
    FullStop,
    #[strum(to_string = "Turn left 10 degrees")]
    TurnLeft10,
    #[strum(to_string = "Turn right 10 degrees")]
    TurnRight10,
    #[strum(to_string = "Turn left 90 degrees")]
    TurnLeft90,
    #[strum(to_string = "Turn right 90 degrees")]
    TurnRight90,
    #[strum(to_string = "Move to waypoint")]
    MoveToWaypoint,
    Delete,
    #[strum(to_string = "Close window")]
    CloseWindow,
}

impl MoveCommand {
    /// Heading change in degrees, right positive.
    pub fn turn_degrees(self) -> Option<f64> {
        match self {
            MoveCommand::TurnLeft10 => Some(-10.0),
            MoveCommand::TurnRight10 => Some(10.0),
            MoveCommand::TurnLeft90 => Some(-90.0),
            MoveCommand::TurnRight90 => Some(90.0),
            _ => None,
        }
    }
}

/// The option shown on menu line `slot`.
pub fn option_at<E: IntoEnumIterator>(slot: usize) -> Option<E> { E::iter().nth(slot) }

pub fn option_labels<E: IntoEnumIterator + ToString>() -> Vec<String> {
    E::iter().map(|e| e.to_string()).collect()
}

/// Maps a throttle percentage to the lever range, truncating.
pub fn throttle_value(percent: u32) -> u32 { THROTTLE_MAX * percent.min(100) / 100 }
