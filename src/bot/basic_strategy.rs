use rand::seq::IndexedRandom;
use tracing::debug;

use crate::game::{Card, GameState, Player, PlayerAction, PowerKind};

use super::types::BotStrategy;

/// Greedy strategy: helps its own garden first, then attacks the strongest opponent,
/// and discards the least useful card when nothing else applies
pub struct BasicBotStrategy;

impl BasicBotStrategy {
    pub fn new() -> Self {
        Self
    }

    fn find_power(hand: &[Card], kind: PowerKind) -> Option<&Card> {
        hand.iter().find(|c| c.is_power(kind))
    }

    /// Weed Killer on one of our own Dandelions
    fn clear_own_dandelion(&self, me: &Player) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::WeedKiller)?;
        let pot_index = me.pots.iter().position(|p| p.has_dandelion())?;
        Some(PlayerAction::PlayWeedKiller {
            card_id: card.id.clone(),
            pot_index,
        })
    }

    /// Compost on our highest-value plant
    fn compost_best_plant(&self, me: &Player) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Compost)?;
        let mut best: Option<(usize, u32)> = None;
        for (index, pot) in me.pots.iter().enumerate() {
            if let Some(value) = pot.plant_value() {
                if best.map_or(true, |(_, top)| value > top) {
                    best = Some((index, value));
                }
            }
        }
        let (pot_index, _) = best?;
        Some(PlayerAction::PlayCompost {
            card_id: card.id.clone(),
            pot_index,
        })
    }

    /// Strongest plant into our own garden, otherwise the weakest one into an opponent's
    fn plant_card(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let mut plants: Vec<&Card> = me.hand.iter().filter(|c| c.is_plant()).collect();
        if plants.is_empty() {
            return None;
        }
        plants.sort_by(|a, b| b.base_value().cmp(&a.base_value()));

        if let Some(pot_index) = me.first_empty_pot() {
            return Some(PlayerAction::PlayPlant {
                card_id: plants[0].id.clone(),
                target_player_id: me.id.clone(),
                pot_index,
            });
        }

        let weakest = plants[plants.len() - 1];
        opponents.iter().find_map(|opponent| {
            opponent
                .first_empty_pot()
                .map(|pot_index| PlayerAction::PlayPlant {
                    card_id: weakest.id.clone(),
                    target_player_id: opponent.id.clone(),
                    pot_index,
                })
        })
    }

    /// Dandelion into the first empty opponent pot
    fn dandelion_opponent(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Dandelion)?;
        opponents.iter().find_map(|opponent| {
            opponent
                .first_empty_pot()
                .map(|pot_index| PlayerAction::PlayDandelion {
                    card_id: card.id.clone(),
                    target_player_id: opponent.id.clone(),
                    pot_index,
                })
        })
    }

    fn random_opponent(opponents: &[&Player]) -> Option<String> {
        opponents.choose(&mut rand::rng()).map(|p| p.id.clone())
    }

    /// Opponent whose single plant is the best according to `better`, first one on ties
    fn opponent_by_plant(
        opponents: &[&Player],
        better: impl Fn(u32, u32) -> bool,
    ) -> Option<String> {
        let mut chosen: Option<(&Player, u32)> = None;
        for opponent in opponents {
            for value in opponent.pots.iter().filter_map(|p| p.plant_value()) {
                if chosen.map_or(true, |(_, current)| better(value, current)) {
                    chosen = Some((opponent, value));
                }
            }
        }
        chosen.map(|(player, _)| player.id.clone())
    }

    fn potzilla_leader(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Potzilla)?;
        let mut leader: Option<(&Player, u32)> = None;
        for opponent in opponents {
            let total = opponent.pot_plant_total();
            if total > 0 && leader.map_or(true, |(_, top)| total > top) {
                leader = Some((opponent, total));
            }
        }
        let target_player_id = match leader {
            Some((player, _)) => player.id.clone(),
            None => Self::random_opponent(opponents)?,
        };
        Some(PlayerAction::PlayPotzilla {
            card_id: card.id.clone(),
            target_player_id,
        })
    }

    fn bust_largest_plant(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Busted)?;
        let target_player_id = Self::opponent_by_plant(opponents, |value, top| value > top)
            .or_else(|| Self::random_opponent(opponents))?;
        Some(PlayerAction::PlayBusted {
            card_id: card.id.clone(),
            target_player_id,
        })
    }

    fn hippie_smallest_plant(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::HippiePower)?;
        let target_player_id = Self::opponent_by_plant(opponents, |value, low| value < low)
            .or_else(|| Self::random_opponent(opponents))?;
        Some(PlayerAction::PlayHippiePower {
            card_id: card.id.clone(),
            target_player_id,
        })
    }

    /// Largest opponent plant into our first empty pot
    fn steal_largest_plant(&self, me: &Player, opponents: &[&Player]) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Steal)?;
        let self_pot_index = me.first_empty_pot()?;

        let mut best: Option<(&Player, usize, u32)> = None;
        for opponent in opponents {
            for (index, pot) in opponent.pots.iter().enumerate() {
                if let Some(value) = pot.plant_value() {
                    if best.map_or(true, |(_, _, top)| value > top) {
                        best = Some((opponent, index, value));
                    }
                }
            }
        }
        let (target, target_pot_index, _) = best?;
        Some(PlayerAction::PlaySteal {
            card_id: card.id.clone(),
            target_player_id: target.id.clone(),
            target_pot_index,
            self_pot_index,
        })
    }

    /// Dandelion first, then the weakest plant, then whatever is first in hand
    fn discard_least_useful(&self, me: &Player) -> Option<PlayerAction> {
        let card = Self::find_power(&me.hand, PowerKind::Dandelion)
            .or_else(|| {
                me.hand
                    .iter()
                    .filter(|c| c.is_plant())
                    .min_by_key(|c| c.base_value())
            })
            .or_else(|| me.hand.first())?;
        Some(PlayerAction::Discard {
            card_id: card.id.clone(),
        })
    }
}

impl Default for BasicBotStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for BasicBotStrategy {
    fn decide_move(&self, state: &GameState, bot_id: &str) -> PlayerAction {
        let Some(me) = state.player(bot_id) else {
            debug!(bot_id = %bot_id, "Bot is not seated, ending turn");
            return PlayerAction::EndTurn;
        };
        let opponents: Vec<&Player> = state.players.iter().filter(|p| p.id != bot_id).collect();

        let action = self
            .clear_own_dandelion(me)
            .or_else(|| self.compost_best_plant(me))
            .or_else(|| self.plant_card(me, &opponents))
            .or_else(|| self.dandelion_opponent(me, &opponents))
            .or_else(|| self.potzilla_leader(me, &opponents))
            .or_else(|| self.bust_largest_plant(me, &opponents))
            .or_else(|| self.hippie_smallest_plant(me, &opponents))
            .or_else(|| self.steal_largest_plant(me, &opponents))
            .or_else(|| self.discard_least_useful(me))
            .unwrap_or(PlayerAction::EndTurn);

        debug!(
            bot_id = %bot_id,
            hand_size = me.hand.len(),
            action = ?action,
            "Bot decided move"
        );
        action
    }

    fn strategy_name(&self) -> &'static str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_utils::{fill_pots, filler_cards, plant, player, playing_state, power};

    fn decide(state: &GameState) -> PlayerAction {
        BasicBotStrategy::new().decide_move(state, "bot")
    }

    #[test]
    fn test_weed_killer_clears_own_dandelion_first() {
        let killer = power(PowerKind::WeedKiller);
        let mut bot = player("bot", vec![plant(5), killer.clone()]);
        bot.pots[2].card = Some(power(PowerKind::Dandelion));
        let state = playing_state(vec![bot, player("p2", vec![])], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayWeedKiller {
                card_id: killer.id,
                pot_index: 2
            }
        );
    }

    #[test]
    fn test_compost_targets_highest_plant() {
        let compost = power(PowerKind::Compost);
        let mut bot = player("bot", vec![compost.clone(), plant(5)]);
        bot.pots[0].card = Some(plant(2));
        bot.pots[3].card = Some(plant(4));
        let state = playing_state(vec![bot, player("p2", vec![])], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayCompost {
                card_id: compost.id,
                pot_index: 3
            }
        );
    }

    #[test]
    fn test_strongest_plant_goes_into_own_empty_pot() {
        let small = plant(1);
        let big = plant(5);
        let mut bot = player("bot", vec![small, big.clone()]);
        bot.pots[0].card = Some(plant(3));
        let state = playing_state(vec![bot, player("p2", vec![])], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayPlant {
                card_id: big.id,
                target_player_id: "bot".to_string(),
                pot_index: 1
            }
        );
    }

    #[test]
    fn test_weakest_plant_goes_to_opponent_when_garden_full() {
        let small = plant(1);
        let mut bot = player("bot", vec![plant(5), small.clone()]);
        fill_pots(&mut bot, filler_cards(5));
        let mut opponent = player("p2", vec![]);
        opponent.pots[0].card = Some(plant(2));
        let state = playing_state(vec![bot, opponent], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayPlant {
                card_id: small.id,
                target_player_id: "p2".to_string(),
                pot_index: 1
            }
        );
    }

    #[test]
    fn test_dandelion_goes_to_first_opponent_with_room() {
        let dandelion = power(PowerKind::Dandelion);
        let mut bot = player("bot", vec![dandelion.clone()]);
        fill_pots(&mut bot, vec![plant(1), plant(1), plant(1), plant(1), plant(1)]);
        let mut full = player("p2", vec![]);
        fill_pots(&mut full, filler_cards(5));
        let state = playing_state(vec![bot, full, player("p3", vec![])], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayDandelion {
                card_id: dandelion.id,
                target_player_id: "p3".to_string(),
                pot_index: 0
            }
        );
    }

    #[test]
    fn test_potzilla_targets_richest_opponent() {
        let potzilla = power(PowerKind::Potzilla);
        let bot = player("bot", vec![potzilla.clone()]);
        let mut poor = player("p2", vec![]);
        poor.pots[0].card = Some(plant(4));
        let mut rich = player("p3", vec![]);
        rich.pots[0].card = Some(plant(3));
        rich.pots[1].card = Some(plant(3));
        let state = playing_state(vec![bot, poor, rich], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlayPotzilla {
                card_id: potzilla.id,
                target_player_id: "p3".to_string()
            }
        );
    }

    #[test]
    fn test_potzilla_picks_random_opponent_without_plants() {
        let potzilla = power(PowerKind::Potzilla);
        let bot = player("bot", vec![potzilla]);
        let state = playing_state(vec![bot, player("p2", vec![]), player("p3", vec![])], vec![]);

        match decide(&state) {
            PlayerAction::PlayPotzilla {
                target_player_id, ..
            } => assert!(target_player_id == "p2" || target_player_id == "p3"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_busted_and_hippie_pick_opposite_extremes() {
        let mut small = player("p2", vec![]);
        small.pots[0].card = Some(plant(1));
        let mut large = player("p3", vec![]);
        large.pots[0].card = Some(plant(5));

        let busted = power(PowerKind::Busted);
        let state = playing_state(
            vec![player("bot", vec![busted.clone()]), small.clone(), large.clone()],
            vec![],
        );
        assert_eq!(
            decide(&state),
            PlayerAction::PlayBusted {
                card_id: busted.id,
                target_player_id: "p3".to_string()
            }
        );

        let hippie = power(PowerKind::HippiePower);
        let state = playing_state(vec![player("bot", vec![hippie.clone()]), small, large], vec![]);
        assert_eq!(
            decide(&state),
            PlayerAction::PlayHippiePower {
                card_id: hippie.id,
                target_player_id: "p2".to_string()
            }
        );
    }

    #[test]
    fn test_steal_takes_largest_plant_into_own_pot() {
        let steal = power(PowerKind::Steal);
        let mut bot = player("bot", vec![steal.clone()]);
        bot.pots[0].card = Some(plant(1));
        let mut opponent = player("p2", vec![]);
        opponent.pots[0].card = Some(plant(2));
        opponent.pots[4].card = Some(plant(5));
        let state = playing_state(vec![bot, opponent], vec![]);

        assert_eq!(
            decide(&state),
            PlayerAction::PlaySteal {
                card_id: steal.id,
                target_player_id: "p2".to_string(),
                target_pot_index: 4,
                self_pot_index: 1
            }
        );
    }

    #[test]
    fn test_steal_without_target_falls_back_to_discard() {
        let steal = power(PowerKind::Steal);
        let state = playing_state(
            vec![player("bot", vec![steal.clone()]), player("p2", vec![])],
            vec![],
        );

        assert_eq!(decide(&state), PlayerAction::Discard { card_id: steal.id });
    }

    #[test]
    fn test_discard_prefers_weakest_plant_when_gardens_full() {
        let weak = plant(1);
        let mut bot = player("bot", vec![plant(4), weak.clone()]);
        fill_pots(&mut bot, filler_cards(5));
        let mut opponent = player("p2", vec![]);
        fill_pots(&mut opponent, filler_cards(5));
        let state = playing_state(vec![bot, opponent], vec![]);

        assert_eq!(decide(&state), PlayerAction::Discard { card_id: weak.id });
    }

    #[test]
    fn test_empty_hand_ends_turn() {
        let state = playing_state(vec![player("bot", vec![]), player("p2", vec![])], vec![]);
        assert_eq!(decide(&state), PlayerAction::EndTurn);
    }
}
