use strum_macros::Display;

/// Tells the run loop whether to keep consuming events.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionSignal {
    Continue,
    Exit,
}

/// Connection state published to the shell.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum LinkStatus {
    NotConnected,
    /// Carries the simulator's display name.
    Connected(String),
    Disconnected,
}
