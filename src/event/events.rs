use serde::{Deserialize, Serialize};

use crate::game::{GameState, PlayerActionPayload};

/// Events flowing through a room's channel.
///
/// `Try*` and request events are commands from connected players; the game subscriber
/// answers them with the fact events below, which the WebSocket subscriber fans out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    // Commands
    TryStartGame {
        player_id: String,
    },
    TryPlayerAction {
        player_id: String,
        payload: PlayerActionPayload,
    },
    TryStartNextRound {
        player_id: String,
    },
    StateRequested {
        player_id: String,
    },
    PlayerDisconnected {
        player_id: String,
    },

    // Facts
    PlayerJoined {
        player_id: String,
        state: GameState,
    },
    GameStarted {
        state: GameState,
    },
    StateUpdated {
        state: GameState,
    },
    /// State sent to one player only (re-sync)
    StateSynced {
        player_id: String,
        state: GameState,
    },
    ActionRejected {
        player_id: String,
        reason: String,
    },
    PlayerLeft {
        player_id: String,
        message: String,
        state: GameState,
    },
    RoomClosed {
        player_ids: Vec<String>,
        message: String,
    },
}

impl RoomEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::TryStartGame { .. } => "try_start_game",
            RoomEvent::TryPlayerAction { .. } => "try_player_action",
            RoomEvent::TryStartNextRound { .. } => "try_start_next_round",
            RoomEvent::StateRequested { .. } => "state_requested",
            RoomEvent::PlayerDisconnected { .. } => "player_disconnected",
            RoomEvent::PlayerJoined { .. } => "player_joined",
            RoomEvent::GameStarted { .. } => "game_started",
            RoomEvent::StateUpdated { .. } => "state_updated",
            RoomEvent::StateSynced { .. } => "state_synced",
            RoomEvent::ActionRejected { .. } => "action_rejected",
            RoomEvent::PlayerLeft { .. } => "player_left",
            RoomEvent::RoomClosed { .. } => "room_closed",
        }
    }
}
