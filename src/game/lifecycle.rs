// Turn, round and game progression around the reducers. Callers apply exactly one
// reducer and then hand the state to `resolve_turn`.

use tracing::{debug, info};

use crate::game::cards::{new_shuffled_deck, Card};
use crate::game::state::{
    GamePhase, GameState, Player, MIN_PLAYERS, STARTING_HAND_SIZE, WINNING_SCORE,
};

/// Fresh board for every seat, keeping identity, host flag and cumulative score
fn reset_players(players: &[Player]) -> Vec<Player> {
    players
        .iter()
        .map(|p| {
            let mut fresh = Player::new(p.id.clone(), p.name.clone());
            fresh.score = p.score;
            fresh.is_host = p.is_host;
            fresh
        })
        .collect()
}

/// Builds a new shuffled deck, deals the starting hands and returns the draw pile
fn deal(players: &mut [Player]) -> Vec<Card> {
    let mut deck = new_shuffled_deck();
    for player in players.iter_mut() {
        for _ in 0..STARTING_HAND_SIZE {
            if let Some(card) = deck.pop() {
                player.hand.push(card);
            }
        }
    }
    deck
}

fn turn_message(state: &GameState) -> String {
    match state.current_player() {
        Some(player) => format!("{}'s turn. Select a card or action.", player.name),
        None => String::new(),
    }
}

/// Deals a new game for the given seats; the first seat starts
pub fn initialize_game(players: Vec<Player>) -> GameState {
    let mut players = reset_players(&players);
    let draw_pile = deal(&mut players);
    let count = players.len();
    let first = players.first().map(|p| p.name.clone()).unwrap_or_default();

    let mut state = GameState::new(players, GamePhase::Playing);
    state.draw_pile = draw_pile;
    state.add_log(format!(
        "Game started with {} players. {} is Player 1.",
        count, first
    ));
    state.message = turn_message(&state);
    state
}

/// Turns a lobby into a dealt game, keeping the room id and seat order
pub fn start_game_from_lobby(lobby: GameState) -> GameState {
    let game_id = lobby.game_id.clone();
    let mut log = lobby.game_log;
    let mut state = initialize_game(lobby.players);
    state.game_id = game_id;

    log.extend(state.game_log.drain(..));
    for entry in log {
        state.add_log(entry);
    }
    info!(game_id = ?state.game_id, players = state.players.len(), "Game started");
    state
}

/// A round ends when someone has five plant pots, or nobody can play another card
pub fn check_round_end(state: &GameState) -> bool {
    if state.players.iter().any(Player::has_full_garden) {
        return true;
    }
    state.draw_pile.is_empty() && state.players.iter().all(|p| p.hand.is_empty())
}

pub fn calculate_round_scores(mut state: GameState) -> GameState {
    for player in state.players.iter_mut() {
        player.round_score = player.pot_plant_total();
    }
    state
}

/// Banks every round score and records the first player holding the top positive score
pub fn determine_round_winner(mut state: GameState) -> GameState {
    for player in state.players.iter_mut() {
        player.score += player.round_score;
    }

    let best = state.players.iter().map(|p| p.round_score).max().unwrap_or(0);
    if best == 0 {
        state.add_log("Round ended. No player scored any plant points this round.");
        state.round_winner = None;
        return state;
    }

    let leaders: Vec<&Player> = state
        .players
        .iter()
        .filter(|p| p.round_score == best)
        .collect();
    let entry = if leaders.len() == 1 {
        format!(
            "{} had the most plants this round with {}!",
            leaders[0].name, best
        )
    } else {
        let names: Vec<&str> = leaders.iter().map(|p| p.name.as_str()).collect();
        format!(
            "Tie for most plants this round! {} each had {}.",
            names.join(" and "),
            best
        )
    };
    let winner = leaders[0].clone();

    state.add_log(entry);
    state.round_winner = Some(winner);
    state
}

/// Highest cumulative score at or above the winning score; ties go to the earlier seat
pub fn check_game_end(state: &GameState) -> Option<Player> {
    let mut winner: Option<&Player> = None;
    for player in state.players.iter().filter(|p| p.score >= WINNING_SCORE) {
        if winner.map_or(true, |w| player.score > w.score) {
            winner = Some(player);
        }
    }
    winner.cloned()
}

/// Scores the finished round and moves to ROUND_OVER or GAME_OVER
pub fn finish_round(state: GameState) -> GameState {
    let mut state = determine_round_winner(calculate_round_scores(state));
    state.target_selection = None;

    match check_game_end(&state) {
        Some(winner) => {
            let entry = format!("{} wins the game with {} points!", winner.name, winner.score);
            info!(game_id = ?state.game_id, winner = %winner.name, "Game over");
            state.add_log(entry.clone());
            state.message = entry;
            state.game_phase = GamePhase::GameOver;
            state.game_winner = Some(winner);
        }
        None => {
            state.message = match &state.round_winner {
                Some(winner) => format!("Round over! {} won the round.", winner.name),
                None => "Round over! Nobody scored this round.".to_string(),
            };
            debug!(game_id = ?state.game_id, "Round over");
            state.game_phase = GamePhase::RoundOver;
        }
    }
    state
}

/// Clears boards and deals a fresh deck. The round winner starts, otherwise the seat after
/// the previous current player.
pub fn start_new_round(state: GameState) -> GameState {
    let count = state.players.len();
    if count == 0 {
        return state;
    }

    let mut players = reset_players(&state.players);
    let draw_pile = deal(&mut players);

    let starter = state
        .round_winner
        .as_ref()
        .and_then(|w| players.iter().position(|p| p.id == w.id))
        .unwrap_or((state.current_player_index + 1) % count);

    let mut next = GameState {
        players,
        draw_pile,
        discard_pile: Vec::new(),
        current_player_index: starter,
        game_phase: GamePhase::Playing,
        round_winner: None,
        target_selection: None,
        turn_action_done: false,
        ..state
    };
    next.add_log("New round started!");
    next.message = turn_message(&next);
    next
}

/// Moves to the next seat, consuming and clearing skip flags along the way
pub fn advance_turn(mut state: GameState) -> GameState {
    let count = state.players.len();
    if count == 0 {
        return state;
    }

    let mut next = (state.current_player_index + 1) % count;
    while state.players[next].is_skipped {
        state.players[next].is_skipped = false;
        let entry = format!("{}'s turn was skipped.", state.players[next].name);
        state.add_log(entry);
        next = (next + 1) % count;
    }

    state.current_player_index = next;
    state.turn_action_done = false;
    state.target_selection = None;
    state.game_phase = GamePhase::Playing;
    state.message = turn_message(&state);
    state
}

/// Passes over players who hold no cards while the draw pile is empty
pub fn skip_stranded_players(mut state: GameState) -> GameState {
    for _ in 0..state.players.len() {
        if check_round_end(&state) {
            return finish_round(state);
        }
        let stranded = state.draw_pile.is_empty()
            && state.current_player().is_some_and(|p| p.hand.is_empty());
        if !stranded {
            break;
        }
        let name = state
            .current_player()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        state.add_log(format!("{} has no cards and cannot draw.", name));
        state = advance_turn(state);
    }
    state
}

/// Post-action pipeline: round end and scoring, or the next player's turn
pub fn resolve_turn(state: GameState) -> GameState {
    if !state.turn_action_done || !state.game_phase.is_in_play() {
        return state;
    }
    if check_round_end(&state) {
        return finish_round(state);
    }
    skip_stranded_players(advance_turn(state))
}

/// Drops a player from the room. Their cards go to the discard pile; the turn passes on
/// if they held it, and a game left with a single player ends in their favour.
pub fn remove_player(mut state: GameState, player_id: &str) -> GameState {
    let Some(index) = state.player_index(player_id) else {
        return state;
    };
    let held_turn = index == state.current_player_index;
    let leaving = state.players.remove(index);

    state.discard_pile.extend(leaving.hand);
    state
        .discard_pile
        .extend(leaving.pots.into_iter().filter_map(|pot| pot.card));
    state.add_log(format!("{} left the game.", leaving.name));
    info!(game_id = ?state.game_id, player = %leaving.name, "Player removed");

    let remaining = state.players.len();
    if index < state.current_player_index {
        state.current_player_index -= 1;
    }
    if remaining == 0 {
        state.current_player_index = 0;
        return state;
    }
    if state.current_player_index >= remaining {
        state.current_player_index = 0;
    }

    let in_game = state.game_phase.is_in_play() || state.game_phase == GamePhase::RoundOver;
    if !in_game {
        return state;
    }

    if remaining < MIN_PLAYERS {
        let winner = state.players[0].clone();
        let entry = format!("{} wins the game, everyone else left.", winner.name);
        state.add_log(entry.clone());
        state.message = entry;
        state.game_phase = GamePhase::GameOver;
        state.target_selection = None;
        state.game_winner = Some(winner);
        return state;
    }

    if held_turn && state.game_phase.is_in_play() {
        // advance from the seat before the one that left
        state.current_player_index = (index + remaining - 1) % remaining;
        return skip_stranded_players(advance_turn(state));
    }
    state
}
