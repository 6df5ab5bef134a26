use async_trait::async_trait;
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::{EventBus, RoomEvent};
use crate::game::PlayerActionPayload;
use crate::shared::{AppError, AppState};
use crate::websockets::messages::{MessageType, WebSocketMessage};

use super::socket::{Connection, MessageHandler};

/// Turns client frames into room commands on the event bus
pub struct WebsocketReceiveHandler {
    event_bus: EventBus,
}

impl WebsocketReceiveHandler {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    /// Malformed input is answered like any other rejected command
    async fn reject(&self, game_id: &str, player_id: &str, reason: String) {
        self.event_bus
            .emit_to_room(
                game_id,
                RoomEvent::ActionRejected {
                    player_id: player_id.to_string(),
                    reason,
                },
            )
            .await;
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, player_id: &str, game_id: &str, message: String) {
        debug!(
            player_id = %player_id,
            game_id = %game_id,
            message = %message,
            "Received message"
        );

        let ws_message = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => ws_message,
            Err(e) => {
                warn!(
                    player_id = %player_id,
                    game_id = %game_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                self.reject(game_id, player_id, format!("Invalid message: {}", e))
                    .await;
                return;
            }
        };

        let player_id = player_id.to_string();
        let event = match ws_message.message_type {
            MessageType::StartGame => RoomEvent::TryStartGame { player_id },
            MessageType::StartNextRound => RoomEvent::TryStartNextRound { player_id },
            MessageType::RequestState => RoomEvent::StateRequested { player_id },
            MessageType::PlayerAction => {
                match serde_json::from_value::<PlayerActionPayload>(ws_message.payload) {
                    Ok(payload) => RoomEvent::TryPlayerAction { player_id, payload },
                    Err(e) => {
                        warn!(
                            player_id = %player_id,
                            game_id = %game_id,
                            error = %e,
                            "Invalid action payload"
                        );
                        self.reject(game_id, &player_id, format!("Invalid action payload: {}", e))
                            .await;
                        return;
                    }
                }
            }
            other => {
                debug!(message_type = ?other, "Unhandled message type");
                self.reject(game_id, &player_id, "Unsupported message type.".to_string())
                    .await;
                return;
            }
        };

        self.event_bus.emit_to_room(game_id, event).await;
    }
}

/// WebSocket endpoint for a seated player
/// GET /ws/{game_id}/{player_id}
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path((game_id, player_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    info!(
        game_id = %game_id,
        player_id = %player_id,
        "WebSocket connection requested"
    );

    if !app_state.game_service.is_member(&game_id, &player_id).await {
        warn!(
            game_id = %game_id,
            player_id = %player_id,
            "Unknown game or player, rejecting WebSocket connection"
        );
        return Err(AppError::NotFound("Game or player not found.".to_string()));
    }

    Ok(ws.on_upgrade(move |socket| {
        handle_websocket_connection(socket, game_id, player_id, app_state)
    }))
}

async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    game_id: String,
    player_id: String,
    app_state: AppState,
) {
    info!(
        game_id = %game_id,
        player_id = %player_id,
        "WebSocket connection established"
    );

    // app -> client
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(player_id.clone(), outbound_sender.clone())
        .await;

    // Current state straight to the new connection
    if let Ok(state) = app_state.game_service.get_state(&game_id).await {
        match WebSocketMessage::state_update(&state)
            .map(|m| m.for_player(&player_id))
            .and_then(|m| serde_json::to_string(&m))
        {
            Ok(message_json) => {
                let _ = outbound_sender.send(message_json);
            }
            Err(e) => warn!(game_id = %game_id, error = %e, "Failed to serialize initial state"),
        }
    }

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.event_bus.clone()));
    let connection = Connection::new(
        player_id.clone(),
        game_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    match connection.run().await {
        Ok(()) => {
            info!(
                game_id = %game_id,
                player_id = %player_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                game_id = %game_id,
                player_id = %player_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    app_state
        .connection_manager
        .remove_connection(&player_id)
        .await;

    // the game subscriber removes the player or closes the room
    app_state
        .event_bus
        .emit_to_room(&game_id, RoomEvent::PlayerDisconnected { player_id })
        .await;
}
