use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use super::types::{HostGameRequest, HostGameResponse, JoinGameRequest, JoinGameResponse};
use crate::event::RoomEvent;
use crate::game::{GameState, JoinOutcome};
use crate::shared::{AppError, AppState};

/// HTTP handler for hosting a new game
///
/// POST /games
/// Opens a lobby with the caller as host and starts the room's event subscriptions
#[instrument(name = "host_game", skip(state))]
pub async fn host_game(
    State(state): State<AppState>,
    Json(request): Json<HostGameRequest>,
) -> Result<Json<HostGameResponse>, AppError> {
    let hosted = state.game_service.host_game(&request.player_name).await?;
    state.start_room_subscriptions(&hosted.game_id).await;

    let host_name = hosted
        .state
        .host()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    info!(game_id = %hosted.game_id, host = %host_name, "Game hosted");

    Ok(Json(HostGameResponse {
        message: format!(
            "Welcome, {}! Share the game link to invite others.",
            host_name
        ),
        game_id: hosted.game_id,
        player_id: hosted.player_id,
        state: hosted.state,
    }))
}

/// HTTP handler for joining a game
///
/// POST /games/{game_id}/join
/// Refusals are reported in the body with `success: false`
#[instrument(name = "join_game", skip(state))]
pub async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<JoinGameRequest>,
) -> (StatusCode, Json<JoinGameResponse>) {
    let joined = match state
        .game_service
        .join_game(&game_id, &request.player_name, request.player_id)
        .await
    {
        Ok(joined) => joined,
        Err(e) => {
            warn!(game_id = %game_id, error = %e, "Join refused");
            return (e.status_code(), Json(JoinGameResponse::refused(e.to_string())));
        }
    };

    state
        .event_bus
        .emit_to_room(
            &game_id,
            RoomEvent::PlayerJoined {
                player_id: joined.player_id.clone(),
                state: joined.state.clone(),
            },
        )
        .await;

    let message = match joined.outcome {
        JoinOutcome::Joined => "Successfully joined game!",
        JoinOutcome::Rejoined => "Rejoined game.",
    };
    (
        StatusCode::OK,
        Json(JoinGameResponse {
            success: true,
            message: message.to_string(),
            state: Some(joined.state),
            player_id: Some(joined.player_id),
        }),
    )
}

/// HTTP handler for re-syncing a client
///
/// GET /games/{game_id}
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameState>, AppError> {
    let game = state.game_service.get_state(&game_id).await?;
    Ok(Json(game))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
