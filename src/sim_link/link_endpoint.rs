use super::link_messages::{self, DownstreamContent, TextStyle};
use crate::bridge::{
    BridgeError, BridgeEvent, CorrelationId, InitPosition, ObjectHandle, SimBridge, TextKind,
};
use crate::menu::{MenuEntry, MenuId};
use crate::{event, info, warn};
use prost::Message;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::net::tcp::{ReadHalf, WriteHalf};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Address the link listens on unless `FLEET_LINK_ADDR` says otherwise.
pub const DEFAULT_LINK_ADDR: &str = "0.0.0.0:1337";
/// Largest frame accepted from the simulator side.
const MAX_FRAME_LEN: u32 = 1 << 20;
/// Commands queued for the writer task. Bridge calls never wait, so a burst
/// longer than this between two writer wakeups loses its oldest commands.
/// Formation placement and deletion issue one command per unit.
const DOWNSTREAM_CAPACITY: usize = 4096;
const UPSTREAM_CAPACITY: usize = 64;

/// TCP endpoint the simulator plugin connects to.
///
/// Frames are protobuf messages behind a big-endian `u32` length. One peer is
/// served at a time, further connections are refused while it is attached.
/// When the peer goes away a [`BridgeEvent::Quit`] is delivered.
pub struct SimLink {
    downstream_sender: broadcast::Sender<Option<Vec<u8>>>,
    close_oneshot_sender: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
}

impl SimLink {
    async fn handle_connection_rx(
        socket: &mut ReadHalf<'_>,
        events: &mpsc::Sender<BridgeEvent>,
    ) -> Result<(), std::io::Error> {
        loop {
            let length = socket.read_u32().await?;
            if length > MAX_FRAME_LEN {
                return Err(std::io::Error::new(
                    ErrorKind::InvalidData,
                    format!("frame of {length} bytes"),
                ));
            }

            let mut buffer = vec![0u8; length as usize];
            socket.read_exact(&mut buffer).await?;

            let content = match link_messages::Upstream::decode(buffer.as_slice()) {
                Ok(link_messages::Upstream { content: Some(content) }) => content,
                Ok(_) => continue,
                Err(e) => {
                    warn!("Dropping undecodable frame: {e}");
                    continue;
                }
            };
            let Some(event) = content.into_event() else {
                event!("Dropping message for unknown menu or entry");
                continue;
            };
            if events.send(event).await.is_err() {
                return Ok(());
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn handle_connection_tx(
        socket: &mut WriteHalf<'_>,
        downstream_receiver: &mut broadcast::Receiver<Option<Vec<u8>>>,
    ) -> Result<(), std::io::Error> {
        loop {
            match downstream_receiver.recv().await {
                Ok(Some(message_buffer)) => {
                    socket.write_u32(message_buffer.len() as u32).await?;
                    socket.write_all(&message_buffer).await?;
                }
                Ok(None) | Err(RecvError::Closed) => return Ok(()),
                Err(RecvError::Lagged(n)) => warn!("Link fell behind, {n} commands lost"),
            }
        }
    }

    /// Binds `addr` and starts accepting the simulator connection.
    ///
    /// # Returns
    /// The link and the receiving end of the event channel the session consumes.
    pub async fn start(addr: &str) -> Result<(Self, mpsc::Receiver<BridgeEvent>), std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("Waiting for the simulator on {local_addr}");
        let downstream_sender = broadcast::Sender::new(DOWNSTREAM_CAPACITY);
        let (event_sender, event_receiver) = mpsc::channel(UPSTREAM_CAPACITY);
        let (close_oneshot_sender, mut close_oneshot_receiver) = oneshot::channel();
        let inst = Self {
            downstream_sender: downstream_sender.clone(),
            close_oneshot_sender: Some(close_oneshot_sender),
            local_addr,
        };

        tokio::spawn(async move {
            loop {
                let accept = tokio::select! {
                    accept = listener.accept() => accept,
                    _ = &mut close_oneshot_receiver => break
                };

                let (mut socket, peer) = match accept {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!("Accepting simulator connection failed: {e}");
                        continue;
                    }
                };
                if downstream_sender.receiver_count() > 0 {
                    warn!("Refusing {peer}, a simulator is already attached");
                    continue;
                }
                info!("Simulator attached from {peer}");
                let events = event_sender.clone();
                let mut downstream_receiver = downstream_sender.subscribe();

                tokio::spawn(async move {
                    let (mut rx_socket, mut tx_socket) = socket.split();

                    let result = tokio::select! {
                        res = SimLink::handle_connection_tx(&mut tx_socket, &mut downstream_receiver) => res,
                        res = SimLink::handle_connection_rx(&mut rx_socket, &events) => res
                    };
                    drop(downstream_receiver);

                    info!("Simulator at {peer} detached");
                    let _ = events.send(BridgeEvent::Quit).await;
                    match result {
                        Err(e)
                            if e.kind() == ErrorKind::UnexpectedEof
                                || e.kind() == ErrorKind::ConnectionReset
                                || e.kind() == ErrorKind::ConnectionAborted =>
                        {
                            return;
                        }
                        Err(e) => warn!("Closing connection to {peer} due to {e}"),
                        Ok(()) => {}
                    }
                    let _ = socket.shutdown().await;
                });
            }
        });
        Ok((inst, event_receiver))
    }

    pub fn local_addr(&self) -> SocketAddr { self.local_addr }

    pub fn is_connected(&self) -> bool { self.downstream_sender.receiver_count() > 0 }

    fn send_downstream(&self, msg: DownstreamContent) -> Result<(), BridgeError> {
        if !self.is_connected() {
            return Err(BridgeError::NotConnected);
        }
        self.downstream_sender
            .send(Some(link_messages::Downstream { content: Some(msg) }.encode_to_vec()))
            .map(|_| ())
            .map_err(|_| BridgeError::NotConnected)
    }
}

impl Drop for SimLink {
    fn drop(&mut self) {
        if let Some(close) = self.close_oneshot_sender.take() {
            let _ = close.send(());
        }
        let _ = self.downstream_sender.send(None);
    }
}

impl SimBridge for SimLink {
    fn subscribe_user_position(&mut self) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::SubscribeUserPosition(
            link_messages::SubscribeUserPosition {},
        ))
    }

    fn bind_shortcut(&mut self, key: &str) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::BindShortcut(link_messages::BindShortcut {
            key: key.to_string(),
        }))
    }

    fn add_menu_entry(&mut self, entry: MenuEntry, label: &str) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::AddMenuEntry(link_messages::AddMenuEntry {
            entry_id: entry as u32,
            label: label.to_string(),
        }))
    }

    fn remove_menu_entry(&mut self, entry: MenuEntry) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::RemoveMenuEntry(link_messages::RemoveMenuEntry {
            entry_id: entry as u32,
        }))
    }

    fn show_menu(
        &mut self,
        menu: MenuId,
        title: &str,
        prompt: &str,
        items: &[String],
        timeout: Duration,
    ) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::ShowMenu(link_messages::ShowMenu {
            menu_id: menu as u32,
            title: title.to_string(),
            prompt: prompt.to_string(),
            items: items.to_vec(),
            timeout_secs: timeout.as_secs_f32(),
        }))
    }

    fn hide_menu(&mut self, menu: MenuId) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::HideMenu(link_messages::HideMenu {
            menu_id: menu as u32,
        }))
    }

    fn print_text(&mut self, kind: TextKind, duration: Duration, text: &str) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::PrintText(link_messages::PrintText {
            style: TextStyle::from(kind) as i32,
            duration_secs: duration.as_secs_f32(),
            text: text.to_string(),
        }))
    }

    fn create_object(
        &mut self,
        type_name: &str,
        init: &InitPosition,
        correlation: CorrelationId,
    ) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::CreateObject(link_messages::CreateObject::new(
            type_name,
            init,
            correlation,
        )))
    }

    fn delete_object(&mut self, handle: ObjectHandle) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::DeleteObject(link_messages::DeleteObject {
            handle: handle.0,
        }))
    }

    fn set_throttle(&mut self, handle: ObjectHandle, value: u32) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::SetThrottle(link_messages::SetThrottle {
            handle: handle.0,
            value,
        }))
    }

    fn set_desired_heading(&mut self, handle: ObjectHandle, heading: f64) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::SetHeading(link_messages::SetHeading {
            handle: handle.0,
            heading,
        }))
    }

    fn request_object_position(
        &mut self,
        handle: ObjectHandle,
        correlation: CorrelationId,
    ) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::RequestObjectPosition(
            link_messages::RequestObjectPosition { handle: handle.0, correlation: correlation.0 },
        ))
    }

    fn request_waypoints(&mut self, correlation: CorrelationId) -> Result<(), BridgeError> {
        self.send_downstream(DownstreamContent::RequestWaypoints(link_messages::RequestWaypoints {
            correlation: correlation.0,
        }))
    }
}
