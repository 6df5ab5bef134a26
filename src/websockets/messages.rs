use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game::GameState;

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    StartGame,
    PlayerAction,
    StartNextRound,
    RequestState,

    // Server -> Client
    PlayerJoined,
    PlayerLeft,
    GameStarted,
    StateUpdate,
    Error,
    RoomClosed,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub player_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub meta: Option<WebSocketMessageMeta>,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize)]
pub struct StatePayload<'a> {
    pub state: &'a GameState,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerLeftPayload<'a> {
    pub state: &'a GameState,
    pub message: &'a str,
}

impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                player_id: None,
            }),
        }
    }

    fn with_payload<T: Serialize>(
        message_type: MessageType,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(message_type, serde_json::to_value(payload)?))
    }

    /// Player the message concerns
    pub fn for_player(mut self, player_id: &str) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.player_id = Some(player_id.to_string());
        }
        self
    }

    /// Create a PLAYER_JOINED message
    pub fn player_joined(state: &GameState) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::PlayerJoined, &StatePayload { state })
    }

    /// Create a PLAYER_LEFT message
    pub fn player_left(state: &GameState, message: &str) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::PlayerLeft, &PlayerLeftPayload { state, message })
    }

    /// Create a GAME_STARTED message
    pub fn game_started(state: &GameState) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::GameStarted, &StatePayload { state })
    }

    /// Create a STATE_UPDATE message
    pub fn state_update(state: &GameState) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::StateUpdate, &StatePayload { state })
    }

    /// Create an ERROR message
    pub fn error(message: impl Into<String>) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("message".to_string(), Value::String(message.into()));
        Self::new(MessageType::Error, Value::Object(payload))
    }

    /// Create a ROOM_CLOSED message
    pub fn room_closed(message: impl Into<String>) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("message".to_string(), Value::String(message.into()));
        Self::new(MessageType::RoomClosed, Value::Object(payload))
    }
}
