use super::MenuId;
use std::time::Duration;

/// Lines of the simulator's one-shot menu.
pub const MENU_SLOTS: usize = 10;
/// Items skipped by one page turn.
const PAGE_STEP: usize = MENU_SLOTS - 2;

const PREVIOUS_LABEL: &str = "Previous page";
const NEXT_LABEL: &str = "Next page";

/// Read access to a catalog shown through a [`PaginatedList`].
pub trait ListSource {
    fn item_count(&self) -> usize;
    fn item_label(&self, index: usize) -> String;
}

/// What a menu line maps to on the current page.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlotAction {
    PreviousPage,
    NextPage,
    Selected(usize),
    Ignored,
}

/// Placement of sentinels and items on one page.
///
/// Slot 0 holds "Previous page" when `first != 0`, slot 9 holds "Next page"
/// when the items do not fit, the remaining slots show items starting at
/// `first`. Both rendering and slot resolution go through this type so they
/// can never disagree.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PageLayout {
    first: usize,
    count: usize,
    has_previous: bool,
    has_next: bool,
}

impl PageLayout {
    pub fn new(len: usize, page_start: usize) -> Self {
        let has_previous = page_start != 0;
        let remaining = len.saturating_sub(page_start);
        let mut capacity = MENU_SLOTS - usize::from(has_previous);
        let has_next = remaining > capacity;
        if has_next {
            capacity -= 1;
        }
        Self { first: page_start, count: remaining.min(capacity), has_previous, has_next }
    }

    pub fn first(&self) -> usize { self.first }
    pub fn count(&self) -> usize { self.count }
    pub fn has_previous(&self) -> bool { self.has_previous }
    pub fn has_next(&self) -> bool { self.has_next }

    /// Number of menu lines this page occupies.
    pub fn line_count(&self) -> usize {
        self.count + usize::from(self.has_previous) + usize::from(self.has_next)
    }

    pub fn resolve(&self, slot: usize) -> SlotAction {
        if slot >= self.line_count() {
            return SlotAction::Ignored;
        }
        if self.has_previous && slot == 0 {
            return SlotAction::PreviousPage;
        }
        let item_slot = slot - usize::from(self.has_previous);
        if item_slot < self.count {
            SlotAction::Selected(self.first + item_slot)
        } else if self.has_next {
            SlotAction::NextPage
        } else {
            SlotAction::Ignored
        }
    }
}

/// A rendered page, ready to be handed to the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPage {
    pub menu: MenuId,
    pub prompt: String,
    pub lines: Vec<String>,
    pub used_previous: bool,
    pub used_next: bool,
    pub timeout: Duration,
}

impl MenuPage {
    /// A page with a fixed set of options and no paging.
    pub fn fixed(menu: MenuId, prompt: impl Into<String>, lines: Vec<String>, timeout: Duration) -> Self {
        Self { menu, prompt: prompt.into(), lines, used_previous: false, used_next: false, timeout }
    }
}

/// Paging state over a [`ListSource`].
///
/// `page_start` only moves in steps of [`PAGE_STEP`] and stays within
/// `0..max(1, len)`.
#[derive(Debug, Clone)]
pub struct PaginatedList<S> {
    source: S,
    page_start: usize,
    menu: MenuId,
    prompt: &'static str,
    timeout: Duration,
}

impl<S: ListSource> PaginatedList<S> {
    pub fn new(source: S, menu: MenuId, prompt: &'static str, timeout: Duration) -> Self {
        Self { source, page_start: 0, menu, prompt, timeout }
    }

    pub fn source(&self) -> &S { &self.source }

    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    pub fn page_start(&self) -> usize { self.page_start }

    pub fn menu(&self) -> MenuId { self.menu }

    pub fn reset_page(&mut self) { self.page_start = 0; }

    pub fn layout(&self) -> PageLayout { PageLayout::new(self.source.item_count(), self.page_start) }

    pub fn render(&self) -> MenuPage {
        let layout = self.layout();
        let mut lines = Vec::with_capacity(layout.line_count());
        if layout.has_previous() {
            lines.push(PREVIOUS_LABEL.to_string());
        }
        lines.extend(
            (layout.first()..layout.first() + layout.count()).map(|i| self.source.item_label(i)),
        );
        if layout.has_next() {
            lines.push(NEXT_LABEL.to_string());
        }
        MenuPage {
            menu: self.menu,
            prompt: self.prompt.to_string(),
            lines,
            used_previous: layout.has_previous(),
            used_next: layout.has_next(),
            timeout: self.timeout,
        }
    }

    /// Maps a chosen line to its action and applies page turns.
    ///
    /// The caller re-renders after [`SlotAction::PreviousPage`] and
    /// [`SlotAction::NextPage`].
    pub fn select(&mut self, slot: usize) -> SlotAction {
        let action = self.layout().resolve(slot);
        let len = self.source.item_count();
        match action {
            SlotAction::PreviousPage => self.page_start = self.page_start.saturating_sub(PAGE_STEP),
            SlotAction::NextPage => {
                self.page_start = (self.page_start + PAGE_STEP).min(len.saturating_sub(1));
            }
            SlotAction::Selected(_) | SlotAction::Ignored => (),
        }
        action
    }
}
