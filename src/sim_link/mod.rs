//! TCP transport between the fleet session and the simulator plugin.

mod link_endpoint;
mod link_messages;
#[cfg(test)]
mod tests;

pub use link_endpoint::{DEFAULT_LINK_ADDR, SimLink};
