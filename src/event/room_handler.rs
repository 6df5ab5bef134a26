use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;

/// Errors raised while reacting to a room event. The subscription loop logs them and
/// keeps consuming.
#[derive(Debug, Error)]
pub enum RoomEventError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Failed to serialize message: {0}")]
    Serialization(String),

    #[error("Handler error: {0}")]
    HandlerError(String),
}

impl From<serde_json::Error> for RoomEventError {
    fn from(err: serde_json::Error) -> Self {
        RoomEventError::Serialization(err.to_string())
    }
}

/// A component that reacts to the events of one room
#[async_trait]
pub trait RoomEventHandler: Send + Sync {
    async fn handle_room_event(&self, room_id: &str, event: RoomEvent)
        -> Result<(), RoomEventError>;

    /// Name used in logs
    fn handler_name(&self) -> &'static str;
}
