use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::event::{EventBus, RoomSubscription};
use crate::game::{GameEventRoomSubscriber, GameService};
use crate::websockets::{ConnectionManager, InMemoryConnectionManager, WebSocketRoomSubscriber};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub event_bus: EventBus,
}

impl AppState {
    pub fn new(
        game_service: Arc<GameService>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            game_service,
            connection_manager,
            event_bus,
        }
    }

    /// In-memory wiring used by the server binary
    pub fn in_memory(event_capacity: usize) -> Self {
        Self::new(
            Arc::new(GameService::new()),
            Arc::new(InMemoryConnectionManager::new()),
            EventBus::with_capacity(event_capacity),
        )
    }

    /// Starts the per-room tasks that process commands and fan out updates
    pub async fn start_room_subscriptions(&self, room_id: &str) {
        info!(room_id = %room_id, "Starting room subscriptions");

        let game_subscriber =
            GameEventRoomSubscriber::new(self.game_service.clone(), self.event_bus.clone());
        RoomSubscription::new(
            room_id.to_string(),
            Arc::new(game_subscriber),
            self.event_bus.clone(),
        )
        .start()
        .await;

        let websocket_subscriber = WebSocketRoomSubscriber::new(self.connection_manager.clone());
        RoomSubscription::new(
            room_id.to_string(),
            Arc::new(websocket_subscriber),
            self.event_bus.clone(),
        )
        .start()
        .await;
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
