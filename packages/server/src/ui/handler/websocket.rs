//! WebSocket connection handlers.
//!
//! A client joins the session by opening `GET /ws`. The server generates
//! an opaque client ID per connection, so clients do not identify
//! themselves on connect. All inbound traffic is JSON events tagged with
//! a `type` field; unparseable frames are logged and dropped without
//! affecting the connection.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, event::ClientEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Generate an opaque per-connection ID on the server side
    let client_id = ClientId::generate();

    ws.on_upgrade(move |socket| handle_socket(socket, state, client_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events destined for this
/// client (via its rx channel) are written to its WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events destined for this client
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, client_id: ClientId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this client to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectParticipantUseCase to handle connection
    // (register_client is called inside the UseCase)
    let joined_at = state
        .connect_participant_usecase
        .execute(client_id.clone(), tx)
        .await;
    tracing::info!(
        "Client '{}' connected at {}",
        client_id.as_str(),
        joined_at.value()
    );

    // Spawn a task to receive events from other clients and send to this client
    let mut send_task = pusher_loop(rx, sender);

    let client_id_for_recv = client_id.clone();
    let state_for_recv = state.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Parse the incoming event; malformed frames are dropped
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping malformed event from '{}': {}",
                                client_id_for_recv.as_str(),
                                e
                            );
                            continue;
                        }
                    };

                    dispatch_event(&state_for_recv, &client_id_for_recv, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", client_id_for_recv.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectParticipantUseCase to handle disconnection
    let count = state
        .disconnect_participant_usecase
        .execute(&client_id)
        .await;
    tracing::info!(
        "Client '{}' disconnected ({} participants remaining)",
        client_id.as_str(),
        count
    );
}

/// Route an inbound event to the matching UseCase
async fn dispatch_event(state: &Arc<AppState>, client_id: &ClientId, event: ClientEvent) {
    match event {
        ClientEvent::SendMessage { username, content } => {
            state.send_message_usecase.execute(username, content).await;
        }
        ClientEvent::VideoControl { payload } => {
            state.relay_control_usecase.execute(client_id, payload).await;
        }
        ClientEvent::RequestSync => {
            state.sync_playback_usecase.execute(client_id).await;
        }
    }
}
