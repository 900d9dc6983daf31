use super::SimLink;
use super::link_messages::{
    Downstream, DownstreamContent, LinkWaypoint, MenuAnswer, MenuAnswerKind, MenuEntrySelected,
    Open, Upstream, UpstreamContent, WaypointList,
};
use crate::bridge::{
    BridgeError, BridgeEvent, DataPayload, MenuResult, ObjectHandle, Selection, SimBridge,
};
use crate::menu::{MenuEntry, MenuId};
use prost::Message;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

fn answer(menu_id: u32, kind: MenuAnswerKind, slot: u32) -> UpstreamContent {
    UpstreamContent::MenuAnswer(MenuAnswer { menu_id, kind: kind as i32, slot })
}

#[test]
fn test_menu_answer_translation() {
    assert_eq!(
        answer(4, MenuAnswerKind::Selected, 3).into_event(),
        Some(BridgeEvent::SelectionMade(Selection::Menu {
            menu: MenuId::Moves,
            result: MenuResult::Slot(3)
        }))
    );
    assert_eq!(
        answer(1, MenuAnswerKind::Timeout, 0).into_event(),
        Some(BridgeEvent::SelectionMade(Selection::Menu {
            menu: MenuId::Formations,
            result: MenuResult::Timeout
        }))
    );
    assert_eq!(answer(9, MenuAnswerKind::Selected, 0).into_event(), None);
    assert_eq!(answer(2, MenuAnswerKind::Selected, 300).into_event(), None);
    let unknown_kind = UpstreamContent::MenuAnswer(MenuAnswer { menu_id: 2, kind: 42, slot: 0 });
    assert_eq!(unknown_kind.into_event(), None);
}

#[test]
fn test_menu_entry_translation() {
    let entry = UpstreamContent::MenuEntrySelected(MenuEntrySelected { entry_id: 3 });
    assert_eq!(
        entry.into_event(),
        Some(BridgeEvent::SelectionMade(Selection::Entry(MenuEntry::RequestPosition)))
    );
    let unknown = UpstreamContent::MenuEntrySelected(MenuEntrySelected { entry_id: 0 });
    assert_eq!(unknown.into_event(), None);
}

#[test]
fn test_waypoint_list_converts_degrees() {
    let list = UpstreamContent::WaypointList(WaypointList {
        correlation: 7,
        index: 1,
        total: 2,
        waypoints: vec![LinkWaypoint { ident: "KSEA".into(), lat_deg: 47.449, lon_deg: -122.309 }],
    });
    let Some(BridgeEvent::DataReceived(DataPayload::Waypoints(batch))) = list.into_event() else {
        panic!("expected a waypoint batch");
    };
    assert_eq!(batch.correlation.0, 7);
    assert!(batch.is_last());
    assert_eq!(batch.waypoints[0].ident(), "KSEA");
    let (lat, lon) = batch.waypoints[0].position().to_degrees();
    assert!((lat - 47.449).abs() < 1e-9);
    assert!((lon + 122.309).abs() < 1e-9);
}

async fn write_frame(stream: &mut TcpStream, content: UpstreamContent) {
    let buffer = Upstream { content: Some(content) }.encode_to_vec();
    stream.write_u32(u32::try_from(buffer.len()).unwrap()).await.unwrap();
    stream.write_all(&buffer).await.unwrap();
}

async fn read_frame(stream: &mut TcpStream) -> DownstreamContent {
    let length = stream.read_u32().await.unwrap();
    let mut buffer = vec![0u8; length as usize];
    stream.read_exact(&mut buffer).await.unwrap();
    Downstream::decode(buffer.as_slice()).unwrap().content.unwrap()
}

async fn attach(link: &SimLink) -> TcpStream {
    let stream = TcpStream::connect(link.local_addr()).await.unwrap();
    for _ in 0..200 {
        if link.is_connected() {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("simulator side never attached");
}

async fn next_event(events: &mut mpsc::Receiver<BridgeEvent>) -> BridgeEvent {
    tokio::time::timeout(Duration::from_secs(2), events.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_commands_fail_without_peer() {
    let (mut link, _events) = SimLink::start("127.0.0.1:0").await.unwrap();
    assert!(!link.is_connected());
    assert_eq!(link.bind_shortcut("Shift+J"), Err(BridgeError::NotConnected));
}

#[tokio::test]
async fn test_round_trip_over_tcp() {
    let (mut link, mut events) = SimLink::start("127.0.0.1:0").await.unwrap();
    let mut stream = attach(&link).await;

    write_frame(&mut stream, UpstreamContent::Open(Open { app_name: "Sim".into() })).await;
    assert_eq!(next_event(&mut events).await, BridgeEvent::Opened { app_name: "Sim".into() });

    link.bind_shortcut("Shift+J").unwrap();
    link.hide_menu(MenuId::Waypoints).unwrap();
    match read_frame(&mut stream).await {
        DownstreamContent::BindShortcut(bind) => assert_eq!(bind.key, "Shift+J"),
        other => panic!("unexpected {other:?}"),
    }
    match read_frame(&mut stream).await {
        DownstreamContent::HideMenu(hide) => assert_eq!(hide.menu_id, 3),
        other => panic!("unexpected {other:?}"),
    }

    drop(stream);
    assert_eq!(next_event(&mut events).await, BridgeEvent::Quit);
}

#[tokio::test]
async fn test_second_peer_is_refused() {
    let (link, _events) = SimLink::start("127.0.0.1:0").await.unwrap();
    let _first = attach(&link).await;
    let mut second = TcpStream::connect(link.local_addr()).await.unwrap();
    let mut buf = [0u8; 4];
    let read = tokio::time::timeout(Duration::from_secs(2), second.read(&mut buf)).await.unwrap();
    assert!(matches!(read, Ok(0) | Err(_)));
    assert!(link.is_connected());
}

#[tokio::test]
async fn test_command_burst_is_delivered_in_order() {
    let (mut link, _events) = SimLink::start("127.0.0.1:0").await.unwrap();
    let mut stream = attach(&link).await;

    for handle in 0..1000 {
        link.delete_object(ObjectHandle(handle)).unwrap();
    }
    for expected in 0..1000 {
        match read_frame(&mut stream).await {
            DownstreamContent::DeleteObject(delete) => assert_eq!(delete.handle, expected),
            other => panic!("unexpected {other:?}"),
        }
    }
}
