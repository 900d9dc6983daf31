use super::{ListSource, MenuId, PageLayout, PaginatedList, SlotAction, MENU_SLOTS};
use std::collections::BTreeSet;
use std::time::Duration;

struct Numbers(usize);

impl ListSource for Numbers {
    fn item_count(&self) -> usize { self.0 }
    fn item_label(&self, index: usize) -> String { format!("item {index}") }
}

fn list(len: usize) -> PaginatedList<Numbers> {
    PaginatedList::new(Numbers(len), MenuId::Formations, "Pick one", Duration::from_secs(15))
}

#[test]
fn test_first_page_layouts() {
    let cases = [
        // len, items shown, previous, next
        (0, 0, false, false),
        (1, 1, false, false),
        (8, 8, false, false),
        (9, 9, false, false),
        (10, 10, false, false),
        (11, 9, false, true),
        (17, 9, false, true),
    ];
    for (len, count, prev, next) in cases {
        let layout = PageLayout::new(len, 0);
        assert_eq!(layout.count(), count, "len {len}");
        assert_eq!(layout.has_previous(), prev, "len {len}");
        assert_eq!(layout.has_next(), next, "len {len}");
    }
}

#[test]
fn test_middle_page_has_eight_items() {
    let layout = PageLayout::new(40, 8);
    assert!(layout.has_previous());
    assert!(layout.has_next());
    assert_eq!(layout.count(), 8);
    assert_eq!(layout.line_count(), MENU_SLOTS);
    assert_eq!(layout.resolve(0), SlotAction::PreviousPage);
    assert_eq!(layout.resolve(1), SlotAction::Selected(8));
    assert_eq!(layout.resolve(8), SlotAction::Selected(15));
    assert_eq!(layout.resolve(9), SlotAction::NextPage);
}

#[test]
fn test_rendered_lines_match_resolution() {
    for len in [0, 1, 8, 9, 10, 17, 33] {
        let mut l = list(len);
        loop {
            let page = l.render();
            let layout = l.layout();
            assert_eq!(page.lines.len(), layout.line_count());
            for (slot, line) in page.lines.iter().enumerate() {
                match layout.resolve(slot) {
                    SlotAction::PreviousPage => assert_eq!(line, "Previous page"),
                    SlotAction::NextPage => assert_eq!(line, "Next page"),
                    SlotAction::Selected(i) => assert_eq!(line, &format!("item {i}")),
                    SlotAction::Ignored => panic!("rendered slot {slot} of len {len} is ignored"),
                }
            }
            for slot in page.lines.len()..=MENU_SLOTS + 2 {
                assert_eq!(layout.resolve(slot), SlotAction::Ignored);
            }
            if !page.used_next {
                break;
            }
            l.select(page.lines.len() - 1);
        }
    }
}

#[test]
fn test_full_traversal_reaches_every_item() {
    for len in [0, 1, 8, 9, 17, 26, 100] {
        let mut l = list(len);
        let mut seen = BTreeSet::new();
        loop {
            let layout = l.layout();
            for slot in 0..MENU_SLOTS {
                if let SlotAction::Selected(i) = layout.resolve(slot) {
                    assert!(i < len);
                    seen.insert(i);
                }
            }
            if !layout.has_next() {
                break;
            }
            assert_eq!(l.select(layout.line_count() - 1), SlotAction::NextPage);
            assert!(l.page_start() < len.max(1));
        }
        assert_eq!(seen.len(), len, "len {len}");
    }
}

#[test]
fn test_next_then_previous_restores_page() {
    let mut l = list(30);
    assert_eq!(l.select(9), SlotAction::NextPage);
    assert_eq!(l.page_start(), 8);
    assert_eq!(l.select(9), SlotAction::NextPage);
    assert_eq!(l.page_start(), 16);
    assert_eq!(l.select(0), SlotAction::PreviousPage);
    assert_eq!(l.page_start(), 8);
    assert_eq!(l.select(0), SlotAction::PreviousPage);
    assert_eq!(l.page_start(), 0);
}

#[test]
fn test_first_slot_on_first_page_is_an_item() {
    let mut l = list(17);
    assert_eq!(l.select(0), SlotAction::Selected(0));
    assert_eq!(l.page_start(), 0);
}

#[test]
fn test_next_without_more_items_is_ignored() {
    let mut l = list(9);
    assert_eq!(l.select(9), SlotAction::Ignored);
    assert_eq!(l.page_start(), 0);

    let mut empty = list(0);
    assert_eq!(empty.select(0), SlotAction::Ignored);
    assert_eq!(empty.page_start(), 0);
    assert!(empty.render().lines.is_empty());
}

#[test]
fn test_render_carries_menu_and_prompt() {
    let page = list(3).render();
    assert_eq!(page.menu, MenuId::Formations);
    assert_eq!(page.prompt, "Pick one");
    assert_eq!(page.timeout, Duration::from_secs(15));
    assert_eq!(page.lines, vec!["item 0", "item 1", "item 2"]);
    assert!(!page.used_previous);
    assert!(!page.used_next);
}

#[test]
fn test_reset_page() {
    let mut l = list(20);
    l.select(9);
    assert_ne!(l.page_start(), 0);
    l.reset_page();
    assert_eq!(l.page_start(), 0);
}
