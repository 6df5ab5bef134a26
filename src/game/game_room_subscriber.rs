use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    event::{EventBus, RoomEvent, RoomEventError, RoomEventHandler},
    game::{
        actions::PlayerActionPayload,
        service::{ActionOutcome, GameService, LeaveOutcome, GAME_NOT_FOUND},
    },
    shared::AppError,
};

/// Processes a room's commands against the game service and emits the outcome as
/// fact events on the same channel
pub struct GameEventRoomSubscriber {
    game_service: Arc<GameService>,
    event_bus: EventBus,
}

#[async_trait]
impl RoomEventHandler for GameEventRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        match event {
            RoomEvent::TryStartGame { player_id } => {
                self.handle_try_start_game(room_id, &player_id).await
            }
            RoomEvent::TryPlayerAction { player_id, payload } => {
                self.handle_try_player_action(room_id, &player_id, &payload)
                    .await
            }
            RoomEvent::TryStartNextRound { player_id } => {
                self.handle_try_start_next_round(room_id, &player_id).await
            }
            RoomEvent::StateRequested { player_id } => {
                self.handle_state_requested(room_id, &player_id).await
            }
            RoomEvent::PlayerDisconnected { player_id } => {
                self.handle_player_disconnected(room_id, &player_id).await
            }
            _ => Ok(()),
        }
    }

    fn handler_name(&self) -> &'static str {
        "GameEventRoomSubscriber"
    }
}

impl GameEventRoomSubscriber {
    pub fn new(game_service: Arc<GameService>, event_bus: EventBus) -> Self {
        Self {
            game_service,
            event_bus,
        }
    }

    /// Sends the failure to the requesting player only; a missing room is a handler error
    async fn reject(&self, room_id: &str, player_id: &str, error: AppError) -> Result<(), RoomEventError> {
        if matches!(&error, AppError::NotFound(message) if message == GAME_NOT_FOUND) {
            return Err(RoomEventError::RoomNotFound(room_id.to_string()));
        }
        warn!(room_id = %room_id, player_id = %player_id, error = %error, "Command rejected");
        self.event_bus
            .emit_to_room(
                room_id,
                RoomEvent::ActionRejected {
                    player_id: player_id.to_string(),
                    reason: error.to_string(),
                },
            )
            .await;
        Ok(())
    }

    async fn handle_try_start_game(&self, room_id: &str, player_id: &str) -> Result<(), RoomEventError> {
        info!(room_id = %room_id, player_id = %player_id, "Start game requested");

        match self.game_service.start_game(room_id, player_id).await {
            Ok(state) => {
                self.event_bus
                    .emit_to_room(room_id, RoomEvent::GameStarted { state })
                    .await;
                Ok(())
            }
            Err(e) => self.reject(room_id, player_id, e).await,
        }
    }

    async fn handle_try_player_action(
        &self,
        room_id: &str,
        player_id: &str,
        payload: &PlayerActionPayload,
    ) -> Result<(), RoomEventError> {
        match self
            .game_service
            .play_action(room_id, player_id, payload)
            .await
        {
            Ok(ActionOutcome::Applied(state)) => {
                self.event_bus
                    .emit_to_room(room_id, RoomEvent::StateUpdated { state })
                    .await;
                Ok(())
            }
            // everyone sees the logged rejection, the sender also gets the reason
            Ok(ActionOutcome::Rejected { reason, state }) => {
                self.event_bus
                    .emit_to_room(room_id, RoomEvent::StateUpdated { state })
                    .await;
                self.event_bus
                    .emit_to_room(
                        room_id,
                        RoomEvent::ActionRejected {
                            player_id: player_id.to_string(),
                            reason,
                        },
                    )
                    .await;
                Ok(())
            }
            Err(e) => self.reject(room_id, player_id, e).await,
        }
    }

    async fn handle_try_start_next_round(
        &self,
        room_id: &str,
        player_id: &str,
    ) -> Result<(), RoomEventError> {
        match self.game_service.start_next_round(room_id, player_id).await {
            Ok(state) => {
                self.event_bus
                    .emit_to_room(room_id, RoomEvent::StateUpdated { state })
                    .await;
                Ok(())
            }
            Err(e) => self.reject(room_id, player_id, e).await,
        }
    }

    async fn handle_state_requested(&self, room_id: &str, player_id: &str) -> Result<(), RoomEventError> {
        match self.game_service.get_state(room_id).await {
            Ok(state) => {
                self.event_bus
                    .emit_to_room(
                        room_id,
                        RoomEvent::StateSynced {
                            player_id: player_id.to_string(),
                            state,
                        },
                    )
                    .await;
                Ok(())
            }
            Err(e) => self.reject(room_id, player_id, e).await,
        }
    }

    async fn handle_player_disconnected(
        &self,
        room_id: &str,
        player_id: &str,
    ) -> Result<(), RoomEventError> {
        let outcome = self
            .game_service
            .leave_game(room_id, player_id)
            .await
            .map_err(|e| RoomEventError::HandlerError(e.to_string()))?;

        match outcome {
            LeaveOutcome::PlayerRemoved { name, state } => {
                info!(room_id = %room_id, player_id = %player_id, "Player left room");
                self.event_bus
                    .emit_to_room(
                        room_id,
                        RoomEvent::PlayerLeft {
                            player_id: player_id.to_string(),
                            message: format!("{} has left the game.", name),
                            state,
                        },
                    )
                    .await;
            }
            LeaveOutcome::RoomClosed { player_ids } => {
                info!(room_id = %room_id, "Host disconnected, closing room");
                self.event_bus
                    .emit_to_room(
                        room_id,
                        RoomEvent::RoomClosed {
                            player_ids,
                            message: "The host has left. The game has ended.".to_string(),
                        },
                    )
                    .await;
                self.event_bus.close_room(room_id).await;
            }
        }
        Ok(())
    }
}
