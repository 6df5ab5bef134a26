use thiserror::Error;
use tracing::warn;

use crate::game::state::{GamePhase, GameState, Player, MAX_PLAYERS, MIN_PLAYERS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("Game room is full.")]
    RoomFull,
    #[error("Game has already started.")]
    GameAlreadyStarted,
    #[error("Need at least 2 players to start.")]
    NotEnoughPlayers,
    #[error("Only the host can do that.")]
    NotHost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    /// The player id was already seated; nothing changed
    Rejoined,
}

/// Empty room waiting for players, with the host in the first seat
pub fn create_lobby(game_id: &str, host_id: &str, host_name: &str) -> GameState {
    let mut host = Player::new(host_id, host_name);
    host.is_host = true;

    let mut state = GameState::new(vec![host], GamePhase::MultiplayerLobby);
    state.game_id = Some(game_id.to_string());
    state.add_log(format!("{} created the game.", host_name));
    state.message = "Waiting for players to join...".to_string();
    state
}

/// Seats a new player. A known player id is accepted again in any phase.
pub fn join_lobby(
    state: &mut GameState,
    player_id: &str,
    player_name: &str,
) -> Result<JoinOutcome, LobbyError> {
    if state.player(player_id).is_some() {
        return Ok(JoinOutcome::Rejoined);
    }
    if state.game_phase != GamePhase::MultiplayerLobby {
        warn!(game_id = ?state.game_id, player_id = %player_id, "Join refused, game started");
        return Err(LobbyError::GameAlreadyStarted);
    }
    if state.players.len() >= MAX_PLAYERS {
        warn!(game_id = ?state.game_id, player_id = %player_id, "Join refused, room full");
        return Err(LobbyError::RoomFull);
    }

    state.players.push(Player::new(player_id, player_name));
    state.add_log(format!("{} joined the game.", player_name));
    state.message = format!(
        "{} of {} players joined. Waiting for the host to start.",
        state.players.len(),
        MAX_PLAYERS
    );
    Ok(JoinOutcome::Joined)
}

pub fn is_host(state: &GameState, player_id: &str) -> bool {
    state.host().is_some_and(|h| h.id == player_id)
}

/// Checks the start conditions for `requester_id`
pub fn check_can_start(state: &GameState, requester_id: &str) -> Result<(), LobbyError> {
    if !is_host(state, requester_id) {
        return Err(LobbyError::NotHost);
    }
    if state.game_phase != GamePhase::MultiplayerLobby {
        return Err(LobbyError::GameAlreadyStarted);
    }
    if state.players.len() < MIN_PLAYERS {
        return Err(LobbyError::NotEnoughPlayers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> GameState {
        create_lobby("brave-heron", "host-id", "Hostess")
    }

    #[test]
    fn test_create_lobby() {
        let state = lobby();

        assert_eq!(state.game_phase, GamePhase::MultiplayerLobby);
        assert_eq!(state.game_id.as_deref(), Some("brave-heron"));
        assert_eq!(state.players.len(), 1);
        assert!(state.players[0].is_host);
        assert!(is_host(&state, "host-id"));
    }

    #[test]
    fn test_join_until_full() {
        let mut state = lobby();
        for i in 1..MAX_PLAYERS {
            let outcome = join_lobby(&mut state, &format!("p{}", i), &format!("Player {}", i));
            assert_eq!(outcome, Ok(JoinOutcome::Joined));
        }

        assert_eq!(
            join_lobby(&mut state, "late", "Late"),
            Err(LobbyError::RoomFull)
        );
        assert_eq!(state.players.len(), MAX_PLAYERS);
    }

    #[test]
    fn test_rejoin_is_idempotent() {
        let mut state = lobby();
        join_lobby(&mut state, "p1", "Bob").unwrap();

        assert_eq!(join_lobby(&mut state, "p1", "Bob"), Ok(JoinOutcome::Rejoined));
        assert_eq!(state.players.len(), 2);
    }

    #[test]
    fn test_join_after_start_refused() {
        let mut state = lobby();
        join_lobby(&mut state, "p1", "Bob").unwrap();
        state.game_phase = GamePhase::Playing;

        assert_eq!(
            join_lobby(&mut state, "p2", "Carol"),
            Err(LobbyError::GameAlreadyStarted)
        );
        assert_eq!(join_lobby(&mut state, "p1", "Bob"), Ok(JoinOutcome::Rejoined));
    }

    #[test]
    fn test_start_rules() {
        let mut state = lobby();
        assert_eq!(
            check_can_start(&state, "host-id"),
            Err(LobbyError::NotEnoughPlayers)
        );

        join_lobby(&mut state, "p1", "Bob").unwrap();
        assert_eq!(check_can_start(&state, "p1"), Err(LobbyError::NotHost));
        assert_eq!(check_can_start(&state, "host-id"), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(LobbyError::RoomFull.to_string(), "Game room is full.");
        assert_eq!(
            LobbyError::NotEnoughPlayers.to_string(),
            "Need at least 2 players to start."
        );
    }
}
