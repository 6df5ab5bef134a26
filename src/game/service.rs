use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    game::{
        actions::{apply_action, PlayerActionPayload},
        errors::ActionError,
        lifecycle::{remove_player, resolve_turn, start_game_from_lobby, start_new_round},
        lobby::{self, JoinOutcome, LobbyError},
        reducers::reject,
        repository::GameRepository,
        state::{GamePhase, GameState, MIN_PLAYERS},
    },
    shared::AppError,
};

pub const GAME_NOT_FOUND: &str = "Game not found.";

/// Room id, seat id and state handed back to the host
#[derive(Debug, Clone)]
pub struct HostedGame {
    pub game_id: String,
    pub player_id: String,
    pub state: GameState,
}

#[derive(Debug, Clone)]
pub struct JoinedGame {
    pub player_id: String,
    pub outcome: JoinOutcome,
    pub state: GameState,
}

/// What a disconnect did to the room
#[derive(Debug, Clone)]
pub enum LeaveOutcome {
    /// A non-host seat was removed
    PlayerRemoved { name: String, state: GameState },
    /// The host left and the room was closed; holds the seats that were still in it
    RoomClosed { player_ids: Vec<String> },
}

/// Result of a card play that passed the turn checks
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action went through and the turn pipeline ran
    Applied(GameState),
    /// The reducer refused the action; `state` only gained the rejection log line
    Rejected { reason: String, state: GameState },
}

impl From<LobbyError> for AppError {
    fn from(err: LobbyError) -> Self {
        match err {
            LobbyError::NotHost => AppError::Forbidden(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Relay operations over the room store. Each command holds the room lock from
/// validation until the new state is stored.
pub struct GameService {
    game_repository: GameRepository,
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}

impl GameService {
    pub fn new() -> Self {
        Self {
            game_repository: GameRepository::new(),
        }
    }

    fn validate_name(player_name: &str) -> Result<String, AppError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Player name cannot be empty".to_string()));
        }
        Ok(name.to_string())
    }

    /// Opens a new room with the caller as host
    #[instrument(skip(self))]
    pub async fn host_game(&self, player_name: &str) -> Result<HostedGame, AppError> {
        let name = Self::validate_name(player_name)?;
        let player_id = Uuid::new_v4().to_string();

        // petnames can collide; retry a few times before giving up
        for _ in 0..8 {
            let game_id = petname::Petnames::default().generate_one(2, "-");
            let state = lobby::create_lobby(&game_id, &player_id, &name);
            if self.game_repository.insert_game(&game_id, state.clone()).await {
                info!(game_id = %game_id, host = %name, "Game hosted");
                return Ok(HostedGame {
                    game_id,
                    player_id,
                    state,
                });
            }
            debug!(game_id = %game_id, "Room id already taken");
        }
        Err(AppError::Internal)
    }

    #[instrument(skip(self))]
    pub async fn join_game(
        &self,
        game_id: &str,
        player_name: &str,
        player_id: Option<String>,
    ) -> Result<JoinedGame, AppError> {
        let name = Self::validate_name(player_name)?;
        let handle = self
            .game_repository
            .get_handle(game_id)
            .await
            .ok_or_else(|| AppError::NotFound(GAME_NOT_FOUND.to_string()))?;

        let player_id = player_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut state = handle.lock().await;
        let outcome = lobby::join_lobby(&mut state, &player_id, &name)?;

        info!(game_id = %game_id, player_id = %player_id, outcome = ?outcome, "Player joined");
        Ok(JoinedGame {
            player_id,
            outcome,
            state: state.clone(),
        })
    }

    #[instrument(skip(self))]
    pub async fn start_game(&self, game_id: &str, requester_id: &str) -> Result<GameState, AppError> {
        let handle = self.room(game_id).await?;
        let mut state = handle.lock().await;
        lobby::check_can_start(&state, requester_id)?;

        let started = start_game_from_lobby(state.clone());
        *state = started.clone();
        Ok(started)
    }

    /// Applies one player's action and runs the post-action pipeline. Turn checks fail
    /// with an error; a rejected card play is stored with its `Error:` log line.
    #[instrument(skip(self, payload))]
    pub async fn play_action(
        &self,
        game_id: &str,
        player_id: &str,
        payload: &PlayerActionPayload,
    ) -> Result<ActionOutcome, AppError> {
        let handle = self.room(game_id).await?;
        let mut state = handle.lock().await;

        if state.player(player_id).is_none() {
            return Err(AppError::NotFound(format!("Player not in game: {}", player_id)));
        }
        if !state.game_phase.is_in_play() {
            return Err(AppError::BadRequest(ActionError::NotPlaying.to_string()));
        }
        if !state.is_current_player(player_id) {
            return Err(AppError::Forbidden(ActionError::NotYourTurn.to_string()));
        }
        if state.turn_action_done {
            return Err(AppError::BadRequest(ActionError::TurnAlreadyDone.to_string()));
        }

        let applied = match payload.resolve(&state, player_id) {
            Ok(action) => apply_action(state.clone(), player_id, &action),
            Err(e) => reject(state.clone(), player_id, e),
        };

        if !applied.turn_action_done {
            let reason = applied
                .game_log
                .last()
                .map(|entry| entry.trim_start_matches("Error: ").to_string())
                .unwrap_or_else(|| "Action rejected.".to_string());
            warn!(game_id = %game_id, player_id = %player_id, reason = %reason, "Action rejected");
            *state = applied.clone();
            return Ok(ActionOutcome::Rejected {
                reason,
                state: applied,
            });
        }

        let next = resolve_turn(applied);
        debug!(
            game_id = %game_id,
            phase = ?next.game_phase,
            current = next.current_player_index,
            "Action resolved"
        );
        *state = next.clone();
        Ok(ActionOutcome::Applied(next))
    }

    #[instrument(skip(self))]
    pub async fn start_next_round(
        &self,
        game_id: &str,
        requester_id: &str,
    ) -> Result<GameState, AppError> {
        let handle = self.room(game_id).await?;
        let mut state = handle.lock().await;

        if !lobby::is_host(&state, requester_id) {
            return Err(LobbyError::NotHost.into());
        }
        if state.game_phase != GamePhase::RoundOver {
            return Err(AppError::BadRequest(ActionError::RoundNotOver.to_string()));
        }
        if state.players.len() < MIN_PLAYERS {
            return Err(LobbyError::NotEnoughPlayers.into());
        }

        let next = start_new_round(state.clone());
        info!(game_id = %game_id, "Next round started");
        *state = next.clone();
        Ok(next)
    }

    pub async fn get_state(&self, game_id: &str) -> Result<GameState, AppError> {
        self.game_repository
            .get_game(game_id)
            .await
            .ok_or_else(|| AppError::NotFound(GAME_NOT_FOUND.to_string()))
    }

    pub async fn is_member(&self, game_id: &str, player_id: &str) -> bool {
        match self.game_repository.get_handle(game_id).await {
            Some(handle) => handle.lock().await.player(player_id).is_some(),
            None => false,
        }
    }

    /// Handles a disconnect: the host closes the room, anyone else gives up their seat
    #[instrument(skip(self))]
    pub async fn leave_game(&self, game_id: &str, player_id: &str) -> Result<LeaveOutcome, AppError> {
        let handle = self.room(game_id).await?;
        let mut state = handle.lock().await;

        let leaving = state
            .player(player_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Player not in game: {}", player_id)))?;

        if leaving.is_host {
            let player_ids: Vec<String> = state
                .player_ids()
                .into_iter()
                .filter(|id| id != player_id)
                .collect();
            drop(state);
            self.game_repository.remove_game(game_id).await;
            info!(game_id = %game_id, "Host left, room closed");
            return Ok(LeaveOutcome::RoomClosed { player_ids });
        }

        let next = remove_player(state.clone(), player_id);
        *state = next.clone();
        Ok(LeaveOutcome::PlayerRemoved {
            name: leaving.name,
            state: next,
        })
    }

    async fn room(&self, game_id: &str) -> Result<crate::game::repository::RoomHandle, AppError> {
        self.game_repository
            .get_handle(game_id)
            .await
            .ok_or_else(|| AppError::NotFound(GAME_NOT_FOUND.to_string()))
    }
}
