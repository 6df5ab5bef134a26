//! Builders for hand-made game states used across the game module tests
#![allow(dead_code)]

use crate::game::cards::{Card, PowerKind};
use crate::game::state::{GamePhase, GameState, Player};

pub fn plant(value: u32) -> Card {
    Card::plant(value, format!("{} plants", value))
}

pub fn power(kind: PowerKind) -> Card {
    Card::power(kind)
}

pub fn player(id: &str, hand: Vec<Card>) -> Player {
    let mut player = Player::new(id, id.to_uppercase());
    player.hand = hand;
    player
}

/// Playing state with the first player to act
pub fn playing_state(players: Vec<Player>, draw_pile: Vec<Card>) -> GameState {
    let mut state = GameState::new(players, GamePhase::Playing);
    state.draw_pile = draw_pile;
    state
}

pub fn fill_pots(player: &mut Player, cards: Vec<Card>) {
    for (pot, card) in player.pots.iter_mut().zip(cards) {
        pot.card = Some(card);
    }
}

pub fn filler_cards(count: usize) -> Vec<Card> {
    (0..count).map(|_| power(PowerKind::Dandelion)).collect()
}
