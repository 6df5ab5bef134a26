use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Request payload for hosting a new game
#[derive(Debug, Deserialize)]
pub struct HostGameRequest {
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HostGameResponse {
    pub game_id: String,
    pub player_id: String,
    pub message: String,
    pub state: GameState,
}

/// Request payload for joining a game. A known `player_id` rejoins the same seat.
#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub player_name: String,
    #[serde(default)]
    pub player_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinGameResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl JoinGameResponse {
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            state: None,
            player_id: None,
        }
    }
}
