// Single-player game against AI seats. The human sits in seat 0; every other seat is
// played by a `BotStrategy` as soon as the turn reaches it.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::game::lifecycle::{initialize_game, resolve_turn, start_new_round};
use crate::game::reducers::end_turn;
use crate::game::selection::{begin_selection, cancel_selection, select_target};
use crate::game::state::{MAX_PLAYERS, MIN_PLAYERS};
use crate::game::{
    apply_action, ActionError, GamePhase, GameState, LobbyError, Player, PlayerAction,
    SelectionTarget,
};

use super::basic_strategy::BasicBotStrategy;
use super::types::BotStrategy;

pub struct SoloGame {
    state: GameState,
    human_id: String,
    strategy: Box<dyn BotStrategy>,
}

impl SoloGame {
    /// Deals a game for one human and `num_players - 1` AI seats named "Player N"
    pub fn new(human_name: &str, num_players: usize) -> Result<Self, LobbyError> {
        Self::with_strategy(human_name, num_players, Box::new(BasicBotStrategy::new()))
    }

    pub fn with_strategy(
        human_name: &str,
        num_players: usize,
        strategy: Box<dyn BotStrategy>,
    ) -> Result<Self, LobbyError> {
        if num_players < MIN_PLAYERS {
            return Err(LobbyError::NotEnoughPlayers);
        }
        if num_players > MAX_PLAYERS {
            return Err(LobbyError::RoomFull);
        }

        let human_id = Uuid::new_v4().to_string();
        let mut seats = vec![Player::new(human_id.clone(), human_name)];
        seats.extend((1..num_players).map(|seat| {
            Player::new(format!("bot-{}", Uuid::new_v4()), format!("Player {}", seat + 1))
        }));

        info!(
            players = num_players,
            strategy = strategy.strategy_name(),
            "Solo game created"
        );

        Ok(Self {
            state: initialize_game(seats),
            human_id,
            strategy,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human_id(&self) -> &str {
        &self.human_id
    }

    pub fn is_human_turn(&self) -> bool {
        self.state.game_phase.is_in_play() && self.state.is_current_player(&self.human_id)
    }

    fn check_human_turn(&self) -> Result<(), ActionError> {
        if !self.state.game_phase.is_in_play() {
            return Err(ActionError::NotPlaying);
        }
        if !self.state.is_current_player(&self.human_id) {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    /// Applies a fully targeted human move, then lets the AI seats play until the turn
    /// comes back or the round ends. A rejected move stays on the log and keeps the turn.
    #[instrument(skip(self))]
    pub fn play(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        self.check_human_turn()?;
        let state = self.take_state();
        self.state = apply_action(state, &self.human_id, &action);
        self.settle();
        Ok(())
    }

    /// Starts interactive targeting for a card in the human's hand
    pub fn select_card(&mut self, card_id: &str) -> Result<(), ActionError> {
        self.check_human_turn()?;
        let state = self.take_state();
        self.state = begin_selection(state, &self.human_id, card_id);
        Ok(())
    }

    pub fn choose_target(&mut self, target: &SelectionTarget) -> Result<(), ActionError> {
        self.check_human_turn()?;
        let state = self.take_state();
        self.state = select_target(state, target);
        self.settle();
        Ok(())
    }

    pub fn cancel_selection(&mut self) {
        let state = self.take_state();
        self.state = cancel_selection(state);
    }

    pub fn start_next_round(&mut self) -> Result<(), ActionError> {
        if self.state.game_phase != GamePhase::RoundOver {
            return Err(ActionError::RoundNotOver);
        }
        let state = self.take_state();
        self.state = start_new_round(state);
        self.run_ai_turns();
        Ok(())
    }

    fn take_state(&mut self) -> GameState {
        std::mem::replace(&mut self.state, GameState::new(Vec::new(), GamePhase::Setup))
    }

    /// Resolves a finished human turn and hands play to the AI seats
    fn settle(&mut self) {
        if !self.state.turn_action_done {
            return;
        }
        let state = self.take_state();
        self.state = resolve_turn(state);
        self.run_ai_turns();
    }

    fn run_ai_turns(&mut self) {
        while self.state.game_phase.is_in_play() && !self.state.is_current_player(&self.human_id) {
            let Some(bot) = self.state.current_player() else {
                break;
            };
            let bot_id = bot.id.clone();
            let action = self.strategy.decide_move(&self.state, &bot_id);
            debug!(bot_id = %bot_id, action = ?action, "AI seat playing");

            let mut state = apply_action(self.take_state(), &bot_id, &action);
            if !state.turn_action_done {
                state = end_turn(state, &bot_id);
            }
            self.state = resolve_turn(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::DECK_SIZE;
    use crate::game::test_utils::{plant, player, playing_state};

    /// Always plays a card id the bot does not hold
    struct BrokenStrategy;

    impl BotStrategy for BrokenStrategy {
        fn decide_move(&self, _state: &GameState, _bot_id: &str) -> PlayerAction {
            PlayerAction::Discard {
                card_id: "missing".to_string(),
            }
        }

        fn strategy_name(&self) -> &'static str {
            "broken"
        }
    }

    fn human_discard(game: &SoloGame) -> PlayerAction {
        let hand = &game.state().player(game.human_id()).unwrap().hand;
        PlayerAction::Discard {
            card_id: hand[0].id.clone(),
        }
    }

    #[test]
    fn test_new_game_seats_and_names() {
        let game = SoloGame::new("Alice", 3).unwrap();
        let names: Vec<&str> = game.state().players.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Alice", "Player 2", "Player 3"]);
        assert_eq!(game.state().players[0].id, game.human_id());
        assert!(game.is_human_turn());
        assert_eq!(game.state().card_count(), DECK_SIZE);
    }

    #[test]
    fn test_player_count_bounds() {
        assert!(matches!(SoloGame::new("Alice", 1), Err(LobbyError::NotEnoughPlayers)));
        assert!(matches!(SoloGame::new("Alice", 6), Err(LobbyError::RoomFull)));
    }

    #[test]
    fn test_play_runs_ai_seats_until_human_again() {
        let mut game = SoloGame::new("Alice", 4).unwrap();
        let action = human_discard(&game);

        game.play(action).unwrap();

        let state = game.state();
        assert!(game.is_human_turn() || !state.game_phase.is_in_play());
        assert_eq!(state.card_count(), DECK_SIZE);
        assert!(state.discard_pile.len() >= 1);
    }

    #[test]
    fn test_rejected_human_move_keeps_turn() {
        let mut game = SoloGame::new("Alice", 2).unwrap();

        game.play(PlayerAction::Discard {
            card_id: "missing".to_string(),
        })
        .unwrap();

        assert!(game.is_human_turn());
        assert!(!game.state().turn_action_done);
        assert_eq!(
            game.state().game_log.last().unwrap(),
            "Error: Card not found in hand."
        );
    }

    #[test]
    fn test_rejected_ai_move_still_ends_its_turn() {
        let mut game = SoloGame::with_strategy("Alice", 2, Box::new(BrokenStrategy)).unwrap();
        let action = human_discard(&game);

        game.play(action).unwrap();

        assert!(game.is_human_turn());
        assert!(game
            .state()
            .game_log
            .iter()
            .any(|entry| entry == "Player 2 couldn't make a move and ends turn."));
    }

    #[test]
    fn test_play_out_of_turn_is_refused() {
        let mut game = SoloGame::new("Alice", 2).unwrap();
        game.state = playing_state(
            vec![player(game.human_id(), vec![plant(1)]), player("bot-x", vec![])],
            vec![],
        );
        game.state.current_player_index = 1;

        assert_eq!(game.play(PlayerAction::EndTurn), Err(ActionError::NotYourTurn));
    }

    #[test]
    fn test_start_next_round_requires_round_over() {
        let mut game = SoloGame::new("Alice", 2).unwrap();
        assert_eq!(game.start_next_round(), Err(ActionError::RoundNotOver));
    }

    #[test]
    fn test_whole_game_progresses_to_game_over() {
        let mut game = SoloGame::new("Alice", 3).unwrap();

        for _ in 0..5000 {
            match game.state().game_phase {
                GamePhase::GameOver => break,
                GamePhase::RoundOver => game.start_next_round().unwrap(),
                _ => {
                    let bot = BasicBotStrategy::new();
                    let action = bot.decide_move(game.state(), game.human_id());
                    game.play(action).unwrap();
                }
            }
            assert_eq!(game.state().card_count(), DECK_SIZE);
        }

        assert_eq!(game.state().game_phase, GamePhase::GameOver);
        assert!(game.state().game_winner.is_some());
    }

    #[test]
    fn test_selection_flow_plays_card() {
        let mut game = SoloGame::new("Alice", 2).unwrap();
        let seed = plant(3);
        game.state = playing_state(
            vec![
                player(game.human_id(), vec![seed.clone(), plant(1)]),
                player("bot-x", vec![plant(2)]),
            ],
            vec![plant(4), plant(5)],
        );

        game.select_card(&seed.id).unwrap();
        assert_eq!(game.state().game_phase, GamePhase::TargetingPlayerPot);

        let human = game.human_id().to_string();
        game.choose_target(&SelectionTarget::Pot {
            player_id: human.clone(),
            pot_index: 0,
        })
        .unwrap();

        let me = game.state().player(&human).unwrap();
        assert_eq!(me.pots[0].plant_value(), Some(3));
        assert!(game.is_human_turn());
    }
}
