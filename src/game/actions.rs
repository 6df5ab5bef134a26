use serde::{Deserialize, Serialize};

use crate::game::cards::{CardKind, PowerKind};
use crate::game::errors::ActionError;
use crate::game::reducers;
use crate::game::state::GameState;

/// One fully targeted move. Produced by the AI, the selection state machine and the
/// wire payload; consumed by `apply_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    PlayPlant {
        card_id: String,
        target_player_id: String,
        pot_index: usize,
    },
    PlayDandelion {
        card_id: String,
        target_player_id: String,
        pot_index: usize,
    },
    PlayWeedKiller {
        card_id: String,
        pot_index: usize,
    },
    PlayCompost {
        card_id: String,
        pot_index: usize,
    },
    PlaySteal {
        card_id: String,
        target_player_id: String,
        target_pot_index: usize,
        self_pot_index: usize,
    },
    PlayHippiePower {
        card_id: String,
        target_player_id: String,
    },
    PlayBusted {
        card_id: String,
        target_player_id: String,
    },
    PlayPotzilla {
        card_id: String,
        target_player_id: String,
    },
    Discard {
        card_id: String,
    },
    EndTurn,
}

impl PlayerAction {
    pub fn card_id(&self) -> Option<&str> {
        match self {
            PlayerAction::PlayPlant { card_id, .. }
            | PlayerAction::PlayDandelion { card_id, .. }
            | PlayerAction::PlayWeedKiller { card_id, .. }
            | PlayerAction::PlayCompost { card_id, .. }
            | PlayerAction::PlaySteal { card_id, .. }
            | PlayerAction::PlayHippiePower { card_id, .. }
            | PlayerAction::PlayBusted { card_id, .. }
            | PlayerAction::PlayPotzilla { card_id, .. }
            | PlayerAction::Discard { card_id } => Some(card_id),
            PlayerAction::EndTurn => None,
        }
    }
}

/// Runs the reducer matching `action` for `player_id`
pub fn apply_action(state: GameState, player_id: &str, action: &PlayerAction) -> GameState {
    match action {
        PlayerAction::PlayPlant {
            card_id,
            target_player_id,
            pot_index,
        } => reducers::play_plant(state, player_id, card_id, target_player_id, *pot_index),
        PlayerAction::PlayDandelion {
            card_id,
            target_player_id,
            pot_index,
        } => reducers::play_dandelion(state, player_id, card_id, target_player_id, *pot_index),
        PlayerAction::PlayWeedKiller { card_id, pot_index } => {
            reducers::play_weed_killer(state, player_id, card_id, *pot_index)
        }
        PlayerAction::PlayCompost { card_id, pot_index } => {
            reducers::play_compost(state, player_id, card_id, *pot_index)
        }
        PlayerAction::PlaySteal {
            card_id,
            target_player_id,
            target_pot_index,
            self_pot_index,
        } => reducers::play_steal(
            state,
            player_id,
            card_id,
            target_player_id,
            *target_pot_index,
            *self_pot_index,
        ),
        PlayerAction::PlayHippiePower {
            card_id,
            target_player_id,
        } => reducers::play_hippie_power(state, player_id, card_id, target_player_id),
        PlayerAction::PlayBusted {
            card_id,
            target_player_id,
        } => reducers::play_busted(state, player_id, card_id, target_player_id),
        PlayerAction::PlayPotzilla {
            card_id,
            target_player_id,
        } => reducers::play_potzilla(state, player_id, card_id, target_player_id),
        PlayerAction::Discard { card_id } => reducers::discard_card(state, player_id, card_id),
        PlayerAction::EndTurn => reducers::end_turn(state, player_id),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    PlayCard,
    DiscardCard,
}

/// Action as sent by a relay client. The card's declared kind decides which targets
/// are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActionPayload {
    pub action_type: ActionType,
    pub card_id: String,
    #[serde(default)]
    pub target_player_id: Option<String>,
    #[serde(default)]
    pub pot_index: Option<usize>,
    #[serde(default)]
    pub self_pot_index: Option<usize>,
}

impl PlayerActionPayload {
    pub fn resolve(&self, state: &GameState, player_id: &str) -> Result<PlayerAction, ActionError> {
        let player = state
            .player(player_id)
            .ok_or_else(|| ActionError::PlayerNotFound(player_id.to_string()))?;
        let card = player
            .card_in_hand(&self.card_id)
            .ok_or(ActionError::CardNotInHand)?;
        let card_id = self.card_id.clone();

        if self.action_type == ActionType::DiscardCard {
            return Ok(PlayerAction::Discard { card_id });
        }

        let action = match card.kind {
            CardKind::Plant { .. } => PlayerAction::PlayPlant {
                card_id,
                target_player_id: self
                    .target_player_id
                    .clone()
                    .unwrap_or_else(|| player_id.to_string()),
                pot_index: self.pot_index()?,
            },
            CardKind::Power { power } => match power {
                PowerKind::Dandelion => PlayerAction::PlayDandelion {
                    card_id,
                    target_player_id: self.target_player()?,
                    pot_index: self.pot_index()?,
                },
                PowerKind::WeedKiller => PlayerAction::PlayWeedKiller {
                    card_id,
                    pot_index: self.pot_index()?,
                },
                PowerKind::Compost => PlayerAction::PlayCompost {
                    card_id,
                    pot_index: self.pot_index()?,
                },
                PowerKind::Steal => PlayerAction::PlaySteal {
                    card_id,
                    target_player_id: self.target_player()?,
                    target_pot_index: self.pot_index()?,
                    self_pot_index: self
                        .self_pot_index
                        .ok_or(ActionError::MissingTarget("self_pot_index"))?,
                },
                PowerKind::HippiePower => PlayerAction::PlayHippiePower {
                    card_id,
                    target_player_id: self.target_player()?,
                },
                PowerKind::Busted => PlayerAction::PlayBusted {
                    card_id,
                    target_player_id: self.target_player()?,
                },
                PowerKind::Potzilla => PlayerAction::PlayPotzilla {
                    card_id,
                    target_player_id: self.target_player()?,
                },
            },
        };
        Ok(action)
    }

    fn target_player(&self) -> Result<String, ActionError> {
        self.target_player_id
            .clone()
            .ok_or(ActionError::MissingTarget("target_player_id"))
    }

    fn pot_index(&self) -> Result<usize, ActionError> {
        self.pot_index.ok_or(ActionError::MissingTarget("pot_index"))
    }
}
