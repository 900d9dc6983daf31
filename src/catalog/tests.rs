use super::{FormationCatalog, MemberSlot, NO_WAYPOINTS_LABEL, SlotParseError, Waypoint, WaypointCatalog};
use crate::bridge::{CorrelationId, WaypointBatch};
use crate::config::FormationDef;
use crate::geo::GeoPoint;
use crate::menu::{ListSource, MenuId, PaginatedList};
use std::time::Duration;

fn waypoint_list() -> PaginatedList<WaypointCatalog> {
    PaginatedList::new(WaypointCatalog::default(), MenuId::Waypoints, "Select waypoint", Duration::ZERO)
}

fn batch(index: u32, total: u32, waypoints: Vec<Waypoint>) -> WaypointBatch {
    WaypointBatch { correlation: CorrelationId(1), index, total, waypoints }
}

#[test]
fn test_member_slot_parse() {
    let slot: MemberSlot = " Destroyer_1 , -800, 1500.5 ".parse().unwrap();
    assert_eq!(slot.type_name(), "Destroyer_1");
    assert!((slot.offset_x() + 800.0).abs() < f64::EPSILON);
    assert!((slot.offset_y() - 1500.5).abs() < f64::EPSILON);

    assert!(matches!("A, 1".parse::<MemberSlot>(), Err(SlotParseError::FieldCount(2))));
    assert!(matches!("A, 1, x".parse::<MemberSlot>(), Err(SlotParseError::Offset(_))));
    assert!(matches!(" , 1, 2".parse::<MemberSlot>(), Err(SlotParseError::EmptyType)));
}

#[test]
fn test_load_keeps_definition_order_and_drops_unusable() {
    let defs = [
        FormationDef::new("Group A", &["A, 0, 0", "B, 10, 20"]),
        FormationDef::new("", &["C, 0, 0"]),
        FormationDef::new("Broken", &["only two, 1"]),
        FormationDef::new("Group B", &["D, 0, 0", "bad line", "E, 5, 5"]),
        FormationDef::new("Group A", &["F, 0, 0"]),
    ];
    let catalog = FormationCatalog::load(&defs);
    let titles: Vec<&str> = catalog.iter().map(|f| f.title()).collect();
    assert_eq!(titles, ["Group A", "Group B", "Group A"]);
    assert_eq!(catalog.get(1).unwrap().len(), 2);
    assert_eq!(catalog.item_label(1), "Group B");
}

#[test]
fn test_empty_load_yields_unplaceable_placeholders() {
    let catalog = FormationCatalog::load(&[FormationDef::new("Nothing", &[])]);
    assert_eq!(catalog.item_count(), 2);
    assert_eq!(catalog.item_label(0), "No formations configured");
    assert_eq!(catalog.item_label(1), "Check the configuration file");
    assert!(catalog.iter().all(|f| f.is_empty()));
}

#[test]
fn test_local_offset_is_north_east() {
    let slot = MemberSlot::new("A", 30.0, 400.0);
    let v = slot.local_offset();
    assert!((v.x() - 400.0).abs() < f64::EPSILON);
    assert!((v.y() - 30.0).abs() < f64::EPSILON);
}

#[test]
fn test_waypoints_accumulate_and_sort_by_distance() {
    let operator = GeoPoint::from_degrees(10.0, 20.0);
    let far = Waypoint::new("FAR", GeoPoint::from_degrees(11.0, 20.0));
    let near = Waypoint::new("NEAR", GeoPoint::from_degrees(10.1, 20.0));
    let mid = Waypoint::new("MID", GeoPoint::from_degrees(10.0, 20.5));

    let mut list = waypoint_list();
    assert!(!list.ingest_batch(batch(0, 2, vec![far]), operator));
    assert!(list.ingest_batch(batch(1, 2, vec![near, mid]), operator));

    let idents: Vec<&str> = list.source().iter().map(Waypoint::ident).collect();
    assert_eq!(idents, ["NEAR", "MID", "FAR"]);
    assert_eq!(list.source().item_label(0), "NEAR (6.0 NM, 0 degrees)");
}

#[test]
fn test_equal_distances_keep_arrival_order() {
    let operator = GeoPoint::new(0.0, 0.0);
    let north = Waypoint::new("N", GeoPoint::new(0.001, 0.0));
    let south = Waypoint::new("S", GeoPoint::new(-0.001, 0.0));
    let mut list = waypoint_list();
    assert!(list.ingest_batch(batch(0, 1, vec![north, south]), operator));
    let idents: Vec<&str> = list.source().iter().map(Waypoint::ident).collect();
    assert_eq!(idents, ["N", "S"]);
}

#[test]
fn test_first_batch_resets_list_and_page() {
    let operator = GeoPoint::new(0.0, 0.0);
    let many: Vec<Waypoint> =
        (0..20u32).map(|i| Waypoint::new(format!("W{i:02}"), GeoPoint::new(0.0, 0.0001 * f64::from(i)))).collect();
    let mut list = waypoint_list();
    assert!(list.ingest_batch(batch(0, 1, many), operator));
    list.select(9);
    assert_eq!(list.page_start(), 8);

    let single = vec![Waypoint::new("ONLY", GeoPoint::new(0.0, 0.001))];
    assert!(list.ingest_batch(batch(0, 1, single), operator));
    assert_eq!(list.page_start(), 0);
    assert_eq!(list.source().item_count(), 1);
}

#[test]
fn test_empty_reply_gets_placeholder_at_operator() {
    let operator = GeoPoint::from_degrees(-33.9, 151.2);
    let mut list = waypoint_list();
    assert!(list.ingest_batch(batch(0, 1, Vec::new()), operator));
    let wp = list.source().get(0).unwrap();
    assert_eq!(wp.ident(), NO_WAYPOINTS_LABEL);
    assert_eq!(wp.position(), operator);
    assert_eq!(list.render().lines.len(), 1);
}

#[test]
fn test_zero_total_counts_as_last_batch() {
    let mut list = waypoint_list();
    assert!(list.ingest_batch(batch(0, 0, Vec::new()), GeoPoint::default()));
    assert_eq!(list.source().item_count(), 1);
}

#[test]
fn test_highest_batch_index_is_last() {
    let mut list = waypoint_list();
    let wp = Waypoint::new("NDB", GeoPoint::from_degrees(1.0, 1.0));
    assert!(batch(u32::MAX, 1, Vec::new()).is_last());
    assert!(batch(u32::MAX, u32::MAX, Vec::new()).is_last());
    assert!(!batch(u32::MAX - 1, u32::MAX, Vec::new()).is_last());
    assert!(list.ingest_batch(batch(u32::MAX, 3, vec![wp]), GeoPoint::default()));
    assert_eq!(list.source().get(0).map(Waypoint::ident), Some("NDB"));
}
