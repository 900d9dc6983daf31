//! Menu identifiers and the paginated one-shot selection list the session uses
//! to present catalogs through the simulator's ten-line text menu.

mod paginated_list;
#[cfg(test)]
mod tests;

pub use paginated_list::{ListSource, MenuPage, PageLayout, PaginatedList, SlotAction, MENU_SLOTS};

use strum_macros::{Display, EnumIter, FromRepr};

/// Window title of every menu the session shows.
pub const MENU_TITLE: &str = "AI Ships";

/// The one-shot menus the session can put on screen. The discriminant is the
/// id carried over the simulator link.
#[derive(Debug, Display, EnumIter, FromRepr, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u32)]
pub enum MenuId {
    Formations = 1,
    PositionTypes = 2,
    Waypoints = 3,
    Moves = 4,
}

/// Entries of the simulator's add-on menu owned by the session.
#[derive(Debug, Display, EnumIter, FromRepr, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u32)]
pub enum MenuEntry {
    /// The "AI Ships" title entry, parent of the others.
    Title = 1,
    ShowHide = 2,
    RequestPosition = 3,
}
