// Multi-step targeting for cards that need a pot or a player. The pending stage lives on
// the state itself, so a client can pick targets one at a time and every step is plain
// data.

use serde::{Deserialize, Serialize};

use crate::game::actions::{apply_action, PlayerAction};
use crate::game::cards::{CardKind, PowerKind};
use crate::game::errors::ActionError;
use crate::game::reducers::reject;
use crate::game::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PendingSelection {
    /// Any player's empty pot
    PlantPot { card_id: String, player_id: String },
    /// An opponent's empty pot
    DandelionPot { card_id: String, player_id: String },
    /// One of the actor's pots holding a Dandelion
    WeedKillerPot { card_id: String, player_id: String },
    /// One of the actor's plant pots
    CompostPot { card_id: String, player_id: String },
    /// An opponent's plant pot to take
    StealTargetPot { card_id: String, player_id: String },
    /// The actor's empty pot receiving the stolen plant
    StealOwnPot {
        card_id: String,
        player_id: String,
        target_player_id: String,
        target_pot_index: usize,
    },
    TargetPlayer {
        card_id: String,
        player_id: String,
        power: PowerKind,
    },
}

impl PendingSelection {
    pub fn player_id(&self) -> &str {
        match self {
            PendingSelection::PlantPot { player_id, .. }
            | PendingSelection::DandelionPot { player_id, .. }
            | PendingSelection::WeedKillerPot { player_id, .. }
            | PendingSelection::CompostPot { player_id, .. }
            | PendingSelection::StealTargetPot { player_id, .. }
            | PendingSelection::StealOwnPot { player_id, .. }
            | PendingSelection::TargetPlayer { player_id, .. } => player_id,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            PendingSelection::PlantPot { .. }
            | PendingSelection::DandelionPot { .. }
            | PendingSelection::StealTargetPot { .. } => GamePhase::TargetingPlayerPot,
            PendingSelection::WeedKillerPot { .. }
            | PendingSelection::CompostPot { .. }
            | PendingSelection::StealOwnPot { .. } => GamePhase::TargetingSelfPot,
            PendingSelection::TargetPlayer { .. } => GamePhase::TargetingPlayer,
        }
    }

    /// Prompt shown to the selecting player
    pub fn prompt(&self, state: &GameState) -> String {
        match self {
            PendingSelection::PlantPot { .. } => {
                "Select an empty pot on ANY player's board for your plant.".to_string()
            }
            PendingSelection::DandelionPot { .. } => "Select an OPPONENT'S empty pot.".to_string(),
            PendingSelection::WeedKillerPot { .. } => "Select one of YOUR Dandelions.".to_string(),
            PendingSelection::CompostPot { .. } => "Select one of YOUR weed plants.".to_string(),
            PendingSelection::StealTargetPot { .. } => {
                "Select an opponent's pot (with a plant).".to_string()
            }
            PendingSelection::StealOwnPot {
                target_player_id, ..
            } => {
                let name = state
                    .player(target_player_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("opponent");
                format!("Stealing from {}. Select YOUR empty pot.", name)
            }
            PendingSelection::TargetPlayer { power, .. } => {
                format!("Select a player for {}.", power)
            }
        }
    }
}

/// What the selecting player clicked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionTarget {
    Pot { player_id: String, pot_index: usize },
    Player { player_id: String },
}

fn check_turn(state: &GameState, player_id: &str) -> Result<(), ActionError> {
    if !state.game_phase.is_in_play() {
        return Err(ActionError::NotPlaying);
    }
    if !state.is_current_player(player_id) {
        return Err(ActionError::NotYourTurn);
    }
    if state.turn_action_done {
        return Err(ActionError::TurnAlreadyDone);
    }
    Ok(())
}

fn start(state: &GameState, player_id: &str, card_id: &str) -> Result<PendingSelection, ActionError> {
    check_turn(state, player_id)?;
    let card = state
        .player(player_id)
        .and_then(|p| p.card_in_hand(card_id))
        .ok_or(ActionError::CardNotInHand)?;

    let card_id = card_id.to_string();
    let player_id = player_id.to_string();
    Ok(match card.kind {
        CardKind::Plant { .. } => PendingSelection::PlantPot { card_id, player_id },
        CardKind::Power { power } => match power {
            PowerKind::Dandelion => PendingSelection::DandelionPot { card_id, player_id },
            PowerKind::WeedKiller => PendingSelection::WeedKillerPot { card_id, player_id },
            PowerKind::Compost => PendingSelection::CompostPot { card_id, player_id },
            PowerKind::Steal => PendingSelection::StealTargetPot { card_id, player_id },
            PowerKind::HippiePower | PowerKind::Busted | PowerKind::Potzilla => {
                PendingSelection::TargetPlayer {
                    card_id,
                    player_id,
                    power,
                }
            }
        },
    })
}

/// Starts targeting for `card_id`. Any selection already pending is replaced.
pub fn begin_selection(mut state: GameState, player_id: &str, card_id: &str) -> GameState {
    match start(&state, player_id, card_id) {
        Ok(selection) => {
            state.game_phase = selection.phase();
            state.message = selection.prompt(&state);
            state.target_selection = Some(selection);
            state
        }
        Err(e) => reject(state, player_id, e),
    }
}

enum Step {
    Next(PendingSelection),
    Play(String, PlayerAction),
}

fn own_pot(player_id: &str, target: &SelectionTarget) -> Result<usize, ActionError> {
    match target {
        SelectionTarget::Pot {
            player_id: owner,
            pot_index,
        } if owner == player_id => Ok(*pot_index),
        _ => Err(ActionError::InvalidTarget),
    }
}

fn any_pot(target: &SelectionTarget) -> Result<(String, usize), ActionError> {
    match target {
        SelectionTarget::Pot {
            player_id,
            pot_index,
        } => Ok((player_id.clone(), *pot_index)),
        SelectionTarget::Player { .. } => Err(ActionError::InvalidTarget),
    }
}

fn step(selection: PendingSelection, target: &SelectionTarget) -> Result<Step, ActionError> {
    let step = match selection {
        PendingSelection::PlantPot { card_id, player_id } => {
            let (target_player_id, pot_index) = any_pot(target)?;
            Step::Play(
                player_id,
                PlayerAction::PlayPlant {
                    card_id,
                    target_player_id,
                    pot_index,
                },
            )
        }
        PendingSelection::DandelionPot { card_id, player_id } => {
            let (target_player_id, pot_index) = any_pot(target)?;
            Step::Play(
                player_id,
                PlayerAction::PlayDandelion {
                    card_id,
                    target_player_id,
                    pot_index,
                },
            )
        }
        PendingSelection::WeedKillerPot { card_id, player_id } => {
            let pot_index = own_pot(&player_id, target)?;
            Step::Play(player_id, PlayerAction::PlayWeedKiller { card_id, pot_index })
        }
        PendingSelection::CompostPot { card_id, player_id } => {
            let pot_index = own_pot(&player_id, target)?;
            Step::Play(player_id, PlayerAction::PlayCompost { card_id, pot_index })
        }
        PendingSelection::StealTargetPot { card_id, player_id } => {
            let (target_player_id, target_pot_index) = any_pot(target)?;
            if target_player_id == player_id {
                return Err(ActionError::MustTargetOpponent(PowerKind::Steal));
            }
            Step::Next(PendingSelection::StealOwnPot {
                card_id,
                player_id,
                target_player_id,
                target_pot_index,
            })
        }
        PendingSelection::StealOwnPot {
            card_id,
            player_id,
            target_player_id,
            target_pot_index,
        } => {
            let self_pot_index = own_pot(&player_id, target)?;
            Step::Play(
                player_id,
                PlayerAction::PlaySteal {
                    card_id,
                    target_player_id,
                    target_pot_index,
                    self_pot_index,
                },
            )
        }
        PendingSelection::TargetPlayer {
            card_id,
            player_id,
            power,
        } => {
            let SelectionTarget::Player {
                player_id: target_player_id,
            } = target.clone()
            else {
                return Err(ActionError::InvalidTarget);
            };
            let action = match power {
                PowerKind::HippiePower => PlayerAction::PlayHippiePower {
                    card_id,
                    target_player_id,
                },
                PowerKind::Busted => PlayerAction::PlayBusted {
                    card_id,
                    target_player_id,
                },
                PowerKind::Potzilla => PlayerAction::PlayPotzilla {
                    card_id,
                    target_player_id,
                },
                _ => return Err(ActionError::InvalidTarget),
            };
            Step::Play(player_id, action)
        }
    };
    Ok(step)
}

/// Feeds one chosen target to the pending selection. Either moves to the next stage or
/// dispatches the completed action; a reducer rejection keeps the selection pending.
pub fn select_target(mut state: GameState, target: &SelectionTarget) -> GameState {
    let Some(selection) = state.target_selection.clone() else {
        let actor = state.current_player().map(|p| p.id.clone()).unwrap_or_default();
        return reject(state, &actor, ActionError::NoSelection);
    };
    let actor = selection.player_id().to_string();

    match step(selection, target) {
        Ok(Step::Next(next)) => {
            state.game_phase = next.phase();
            state.message = next.prompt(&state);
            state.target_selection = Some(next);
            state
        }
        Ok(Step::Play(player_id, action)) => apply_action(state, &player_id, &action),
        Err(e) => reject(state, &actor, e),
    }
}

pub fn cancel_selection(mut state: GameState) -> GameState {
    if state.target_selection.take().is_some() {
        state.game_phase = GamePhase::Playing;
        if let Some(player) = state.current_player() {
            state.message = format!("{}'s turn. Select a card or action.", player.name);
        }
    }
    state
}
