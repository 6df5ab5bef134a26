// One transition per card action. Every reducer takes the state by value and hands it
// back: either fully updated, or untouched apart from one "Error: ..." log line.
// All preconditions are checked before the first mutation.

use tracing::{debug, warn};

use crate::game::cards::{Card, CardKind, PowerKind};
use crate::game::errors::ActionError;
use crate::game::state::{GamePhase, GameState, Player, NUM_POTS};

/// Runs `apply` for the actor holding `card_id`, then finishes the turn action.
/// `apply` receives (state, actor index, hand index) and returns the log entry.
fn reduce<F>(mut state: GameState, player_id: &str, card_id: &str, verb: &str, apply: F) -> GameState
where
    F: FnOnce(&mut GameState, usize, usize) -> Result<String, ActionError>,
{
    let result = locate_card(&state, player_id, card_id)
        .and_then(|(actor, hand_index)| Ok((actor, apply(&mut state, actor, hand_index)?)));

    match result {
        Ok((actor, entry)) => {
            complete_action(&mut state, actor, entry, verb);
            state
        }
        Err(e) => reject(state, player_id, e),
    }
}

fn locate_card(
    state: &GameState,
    player_id: &str,
    card_id: &str,
) -> Result<(usize, usize), ActionError> {
    let actor = state
        .player_index(player_id)
        .ok_or_else(|| ActionError::PlayerNotFound(player_id.to_string()))?;
    let hand_index = state.players[actor]
        .hand
        .iter()
        .position(|c| c.id == card_id)
        .ok_or(ActionError::CardNotInHand)?;
    Ok((actor, hand_index))
}

pub(crate) fn reject(mut state: GameState, player_id: &str, error: ActionError) -> GameState {
    warn!(player_id = %player_id, error = %error, "Action rejected");
    state.add_log(format!("Error: {}", error));
    state
}

/// Draws the replacement card, writes the single log entry and closes the action
fn complete_action(state: &mut GameState, actor: usize, entry: String, verb: &str) {
    let drawn = draw_replacement(state, actor);
    let name = state.players[actor].name.clone();

    let entry = if drawn {
        entry
    } else {
        format!("{} {} would draw a card, but the draw pile is empty.", entry, name)
    };
    debug!(player = %name, entry = %entry, "Action applied");

    state.add_log(entry);
    state.turn_action_done = true;
    state.game_phase = GamePhase::Playing;
    state.target_selection = None;
    state.message = format!("{} {}. Waiting for next player...", name, verb);
}

fn draw_replacement(state: &mut GameState, actor: usize) -> bool {
    match state.draw_pile.pop() {
        Some(card) => {
            state.players[actor].hand.push(card);
            true
        }
        None => false,
    }
}

fn require_power(card: &Card, kind: PowerKind, label: &'static str) -> Result<(), ActionError> {
    if card.is_power(kind) {
        Ok(())
    } else {
        Err(ActionError::WrongCard(label))
    }
}

fn check_pot(index: usize) -> Result<usize, ActionError> {
    if index < NUM_POTS {
        Ok(index)
    } else {
        Err(ActionError::PotOutOfRange(index))
    }
}

fn opponent_index(
    state: &GameState,
    actor: usize,
    target_player_id: &str,
    kind: PowerKind,
) -> Result<usize, ActionError> {
    let target = state
        .player_index(target_player_id)
        .ok_or_else(|| ActionError::PlayerNotFound(target_player_id.to_string()))?;
    if target == actor {
        return Err(ActionError::MustTargetOpponent(kind));
    }
    Ok(target)
}

/// Index of the plant pot with the smallest current value; ties go to the lowest index
pub fn weakest_plant_pot(player: &Player) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, pot) in player.pots.iter().enumerate() {
        if let Some(value) = pot.plant_value() {
            if best.map_or(true, |(_, v)| value < v) {
                best = Some((index, value));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Index of the plant pot with the largest current value; ties go to the lowest index
pub fn strongest_plant_pot(player: &Player) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, pot) in player.pots.iter().enumerate() {
        if let Some(value) = pot.plant_value() {
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((index, value));
            }
        }
    }
    best.map(|(index, _)| index)
}

pub fn discard_card(state: GameState, player_id: &str, card_id: &str) -> GameState {
    reduce(state, player_id, card_id, "discarded a card", |state, actor, hand_index| {
        let card = state.players[actor].hand.remove(hand_index);
        let entry = format!("{} discarded {}.", state.players[actor].name, card);
        state.discard_pile.push(card);
        Ok(entry)
    })
}

/// Plants into any player's empty pot, own or opponent's
pub fn play_plant(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
    pot_index: usize,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        if !state.players[actor].hand[hand_index].is_plant() {
            return Err(ActionError::WrongCard("plant"));
        }
        let target = state
            .player_index(target_player_id)
            .ok_or_else(|| ActionError::PlayerNotFound(target_player_id.to_string()))?;
        let pot_index = check_pot(pot_index)?;
        if !state.players[target].pots[pot_index].is_empty() {
            return Err(ActionError::PotOccupied {
                owner: state.players[target].name.clone(),
                pot: pot_index + 1,
            });
        }

        let card = state.players[actor].hand.remove(hand_index);
        let planted = card.with_base_value();
        let base = planted.base_value().unwrap_or_default();
        state.players[target].pots[pot_index].card = Some(planted);

        let actor_name = &state.players[actor].name;
        Ok(if target == actor {
            format!(
                "{} planted a {}-plant card in their pot {}.",
                actor_name,
                base,
                pot_index + 1
            )
        } else {
            format!(
                "{} planted a {}-plant card in {}'s pot {}.",
                actor_name,
                base,
                state.players[target].name,
                pot_index + 1
            )
        })
    })
}

pub fn play_dandelion(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
    pot_index: usize,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::Dandelion,
            "Dandelion",
        )?;
        let target = opponent_index(state, actor, target_player_id, PowerKind::Dandelion)?;
        let pot_index = check_pot(pot_index)?;
        if !state.players[target].pots[pot_index].is_empty() {
            return Err(ActionError::PotOccupied {
                owner: state.players[target].name.clone(),
                pot: pot_index + 1,
            });
        }

        let card = state.players[actor].hand.remove(hand_index);
        state.players[target].pots[pot_index].card = Some(card);
        Ok(format!(
            "{} planted a Dandelion in {}'s pot {}.",
            state.players[actor].name,
            state.players[target].name,
            pot_index + 1
        ))
    })
}

pub fn play_weed_killer(
    state: GameState,
    player_id: &str,
    card_id: &str,
    pot_index: usize,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::WeedKiller,
            "Weed Killer",
        )?;
        let pot_index = check_pot(pot_index)?;
        if !state.players[actor].pots[pot_index].has_dandelion() {
            return Err(ActionError::NoDandelionInPot);
        }

        let weed_killer = state.players[actor].hand.remove(hand_index);
        let dandelion = state.players[actor].pots[pot_index].card.take();
        state.discard_pile.push(weed_killer);
        state.discard_pile.extend(dandelion);
        Ok(format!(
            "{} used Weed Killer on pot {}, removing a Dandelion.",
            state.players[actor].name,
            pot_index + 1
        ))
    })
}

/// Doubles the current value of one of the actor's plants; the base value is kept
pub fn play_compost(state: GameState, player_id: &str, card_id: &str, pot_index: usize) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::Compost,
            "Compost",
        )?;
        let pot_index = check_pot(pot_index)?;
        if !state.players[actor].pots[pot_index].has_plant() {
            return Err(ActionError::NoPlantInPot);
        }

        let compost = state.players[actor].hand.remove(hand_index);
        state.discard_pile.push(compost);

        let (before, after) = match state.players[actor].pots[pot_index].card.as_mut() {
            Some(Card {
                kind: CardKind::Plant { value, .. },
                ..
            }) => {
                let before = *value;
                *value *= 2;
                (before, *value)
            }
            _ => return Err(ActionError::NoPlantInPot),
        };

        Ok(format!(
            "{} used Compost on pot {}. Plants increased from {} to {}.",
            state.players[actor].name,
            pot_index + 1,
            before,
            after
        ))
    })
}

pub fn play_steal(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
    target_pot_index: usize,
    self_pot_index: usize,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::Steal,
            "Steal",
        )?;
        let target = opponent_index(state, actor, target_player_id, PowerKind::Steal)?;
        let target_pot_index = check_pot(target_pot_index)?;
        let self_pot_index = check_pot(self_pot_index)?;
        if !state.players[target].pots[target_pot_index].has_plant() {
            return Err(ActionError::NothingToSteal);
        }
        if !state.players[actor].pots[self_pot_index].is_empty() {
            return Err(ActionError::OwnPotNotEmpty);
        }

        let steal = state.players[actor].hand.remove(hand_index);
        state.discard_pile.push(steal);
        let stolen = state.players[target].pots[target_pot_index].card.take();
        let plants = stolen.as_ref().and_then(Card::plant_value).unwrap_or_default();
        state.players[actor].pots[self_pot_index].card = stolen;

        Ok(format!(
            "{} stole pot {} ({} plants) from {} and placed it in their pot {}.",
            state.players[actor].name,
            target_pot_index + 1,
            plants,
            state.players[target].name,
            self_pot_index + 1
        ))
    })
}

pub fn play_hippie_power(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::HippiePower,
            "Hippie Power",
        )?;
        let target = opponent_index(state, actor, target_player_id, PowerKind::HippiePower)?;

        let card = state.players[actor].hand.remove(hand_index);
        state.discard_pile.push(card);

        let actor_name = state.players[actor].name.clone();
        let target_name = state.players[target].name.clone();
        Ok(match weakest_plant_pot(&state.players[target]) {
            Some(pot_index) => {
                let destroyed = state.players[target].pots[pot_index].card.take();
                let plants = destroyed.as_ref().and_then(Card::plant_value).unwrap_or_default();
                let entry = format!(
                    "{} used Hippie Power on {}, destroying their {}-plant pot.",
                    actor_name, target_name, plants
                );
                state.discard_pile.extend(destroyed);
                entry
            }
            None => format!(
                "{} used Hippie Power on {}, but they had no weed plants to destroy.",
                actor_name, target_name
            ),
        })
    })
}

/// Destroys the target's largest plant and always makes them skip their next turn
pub fn play_busted(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::Busted,
            "Busted",
        )?;
        let target = opponent_index(state, actor, target_player_id, PowerKind::Busted)?;

        let card = state.players[actor].hand.remove(hand_index);
        state.discard_pile.push(card);
        state.players[target].is_skipped = true;

        let actor_name = state.players[actor].name.clone();
        let target_name = state.players[target].name.clone();
        Ok(match strongest_plant_pot(&state.players[target]) {
            Some(pot_index) => {
                let destroyed = state.players[target].pots[pot_index].card.take();
                let plants = destroyed.as_ref().and_then(Card::plant_value).unwrap_or_default();
                let entry = format!(
                    "{} used Busted on {}, destroying their {}-plant pot. {} skips next turn.",
                    actor_name, target_name, plants, target_name
                );
                state.discard_pile.extend(destroyed);
                entry
            }
            None => format!(
                "{} used Busted on {}. They had no plants, but still skip their next turn.",
                actor_name, target_name
            ),
        })
    })
}

pub fn play_potzilla(
    state: GameState,
    player_id: &str,
    card_id: &str,
    target_player_id: &str,
) -> GameState {
    reduce(state, player_id, card_id, "played a card", |state, actor, hand_index| {
        require_power(
            &state.players[actor].hand[hand_index],
            PowerKind::Potzilla,
            "Potzilla",
        )?;
        let target = opponent_index(state, actor, target_player_id, PowerKind::Potzilla)?;

        let card = state.players[actor].hand.remove(hand_index);
        state.discard_pile.push(card);

        let destroyed: Vec<Card> = state.players[target]
            .pots
            .iter_mut()
            .filter_map(|pot| pot.card.take())
            .collect();

        let actor_name = &state.players[actor].name;
        let target_name = &state.players[target].name;
        let entry = if destroyed.is_empty() {
            format!(
                "{} used Potzilla on {}, but they had no plants or dandelions to destroy.",
                actor_name, target_name
            )
        } else {
            format!(
                "{} unleashed Potzilla on {}, destroying all their pots!",
                actor_name, target_name
            )
        };
        state.discard_pile.extend(destroyed);
        Ok(entry)
    })
}

/// Ends the actor's turn without playing a card
pub fn end_turn(mut state: GameState, player_id: &str) -> GameState {
    let Some(actor) = state.player_index(player_id) else {
        return reject(state, player_id, ActionError::PlayerNotFound(player_id.to_string()));
    };
    if state.turn_action_done {
        return reject(state, player_id, ActionError::TurnAlreadyDone);
    }

    let name = state.players[actor].name.clone();
    state.add_log(format!("{} couldn't make a move and ends turn.", name));
    state.turn_action_done = true;
    state.game_phase = GamePhase::Playing;
    state.target_selection = None;
    state.message = format!("{} ended their turn. Waiting for next player...", name);
    state
}
