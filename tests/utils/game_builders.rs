#![allow(dead_code)]

use growpot::game::{Card, GamePhase, GameState, Player, PowerKind};

// ============================================================================
// Card Helpers
// ============================================================================

pub fn plant(value: u32) -> Card {
    Card::plant(value, format!("{} plants", value))
}

pub fn power(kind: PowerKind) -> Card {
    Card::power(kind)
}

/// Cards that fill the draw pile without mattering to the test
pub fn filler(count: usize) -> Vec<Card> {
    (0..count).map(|_| plant(1)).collect()
}

// ============================================================================
// Game Setup Utilities
// ============================================================================

/// Builds a hand-made playing state. Player ids are the lowercased names.
pub struct GameBuilder {
    players: Vec<Player>,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    current_player_index: usize,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            draw_pile: vec![],
            discard_pile: vec![],
            current_player_index: 0,
        }
    }

    pub fn with_player(mut self, name: &str, hand: Vec<Card>) -> Self {
        let mut player = Player::new(name.to_lowercase(), name);
        player.hand = hand;
        self.players.push(player);
        self
    }

    /// Fills the most recently added player's pots from the left
    pub fn with_pots(mut self, cards: Vec<Card>) -> Self {
        let player = self.players.last_mut().expect("add a player first");
        for (pot, card) in player.pots.iter_mut().zip(cards) {
            pot.card = Some(card);
        }
        self
    }

    /// Cumulative score of the most recently added player
    pub fn with_score(mut self, score: u32) -> Self {
        self.players.last_mut().expect("add a player first").score = score;
        self
    }

    pub fn with_draw_pile(mut self, cards: Vec<Card>) -> Self {
        self.draw_pile = cards;
        self
    }

    pub fn with_discard_pile(mut self, cards: Vec<Card>) -> Self {
        self.discard_pile = cards;
        self
    }

    pub fn with_current_player(mut self, index: usize) -> Self {
        self.current_player_index = index;
        self
    }

    pub fn build(self) -> GameState {
        let mut state = GameState::new(self.players, GamePhase::Playing);
        state.draw_pile = self.draw_pile;
        state.discard_pile = self.discard_pile;
        state.current_player_index = self.current_player_index;
        state
    }
}
