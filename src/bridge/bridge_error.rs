use strum_macros::Display;

/// Reasons a bridge command could not be handed to the simulator.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// No simulator is attached.
    NotConnected,
    /// The simulator side refused the command before it was queued.
    Rejected(String),
}

impl std::error::Error for BridgeError {}
