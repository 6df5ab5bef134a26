// Library crate for the growpot game engine and relay server
// This file exposes the public API for the binary and integration tests

pub mod bot;
pub mod config;
pub mod event;
pub mod game;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use bot::{BasicBotStrategy, BotStrategy, SoloGame};
pub use config::{ConfigError, ServerConfig};
pub use event::{EventBus, RoomEvent, RoomSubscription};
pub use game::{GameService, GameState, PlayerAction, PlayerActionPayload};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, MessageHandler, MessageType, WebSocketMessage, WebSocketRoomSubscriber,
    WebsocketReceiveHandler,
};

/// HTTP and WebSocket routes of the relay
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(room::health))
        .route("/games", post(room::host_game))
        .route("/games/:game_id", get(room::get_game))
        .route("/games/:game_id/join", post(room::join_game))
        .route("/ws/:game_id/:player_id", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
