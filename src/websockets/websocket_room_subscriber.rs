use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{RoomEvent, RoomEventError, RoomEventHandler},
    game::GameState,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

/// Fans a room's fact events out to the sockets of the players they concern
pub struct WebSocketRoomSubscriber {
    connection_manager: Arc<dyn ConnectionManager>,
}

#[async_trait]
impl RoomEventHandler for WebSocketRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        match event {
            RoomEvent::PlayerJoined { player_id, state } => {
                let message = WebSocketMessage::player_joined(&state)?.for_player(&player_id);
                self.broadcast(room_id, &state, &message).await
            }
            RoomEvent::GameStarted { state } => {
                let message = WebSocketMessage::game_started(&state)?;
                self.broadcast(room_id, &state, &message).await
            }
            RoomEvent::StateUpdated { state } => {
                let message = WebSocketMessage::state_update(&state)?;
                self.broadcast(room_id, &state, &message).await
            }
            RoomEvent::StateSynced { player_id, state } => {
                let message = WebSocketMessage::state_update(&state)?.for_player(&player_id);
                self.send_to(&player_id, &message).await
            }
            RoomEvent::ActionRejected { player_id, reason } => {
                let message = WebSocketMessage::error(reason).for_player(&player_id);
                self.send_to(&player_id, &message).await
            }
            RoomEvent::PlayerLeft {
                player_id,
                message,
                state,
            } => {
                let message =
                    WebSocketMessage::player_left(&state, &message)?.for_player(&player_id);
                self.broadcast(room_id, &state, &message).await
            }
            RoomEvent::RoomClosed {
                player_ids,
                message,
            } => {
                let message_json = serde_json::to_string(&WebSocketMessage::room_closed(message))?;
                self.connection_manager
                    .send_to_players(&player_ids, &message_json)
                    .await;
                Ok(())
            }
            // commands are the game subscriber's business
            _ => Ok(()),
        }
    }

    fn handler_name(&self) -> &'static str {
        "WebSocketRoomSubscriber"
    }
}

impl WebSocketRoomSubscriber {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Sends to every player seated in `state`
    async fn broadcast(
        &self,
        room_id: &str,
        state: &GameState,
        message: &WebSocketMessage,
    ) -> Result<(), RoomEventError> {
        let message_json = serde_json::to_string(message)?;
        let player_ids = state.player_ids();
        debug!(
            room_id = %room_id,
            message_type = ?message.message_type,
            recipients = player_ids.len(),
            "Broadcasting to room"
        );
        self.connection_manager
            .send_to_players(&player_ids, &message_json)
            .await;
        Ok(())
    }

    async fn send_to(
        &self,
        player_id: &str,
        message: &WebSocketMessage,
    ) -> Result<(), RoomEventError> {
        let message_json = serde_json::to_string(message)?;
        self.connection_manager
            .send_to_player(player_id, &message_json)
            .await;
        Ok(())
    }
}
