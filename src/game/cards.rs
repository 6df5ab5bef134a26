use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use uuid::Uuid;

/// Plant card copies in the catalog: (plants, copies, description)
const PLANT_DISTRIBUTION: [(u32, usize, &str); 6] = [
    (1, 6, "1 Weed Plant. Grow the basics."),
    (2, 8, "2 Weed Plants. Nice buds!"),
    (3, 7, "3 Weed Plants. Getting strong!"),
    (4, 5, "4 Weed Plants. Dank stuff."),
    (5, 2, "5 Weed Plants. Super harvest!"),
    (6, 1, "6 Weed Plants. Legendary yield!"),
];

pub const PLANT_CARD_COUNT: usize = 29;
pub const POWER_CARD_COUNT: usize = 25;
pub const DECK_SIZE: usize = PLANT_CARD_COUNT + POWER_CARD_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerKind {
    Steal,
    HippiePower,
    Busted,
    Compost,
    Potzilla,
    Dandelion,
    WeedKiller,
}

impl PowerKind {
    /// Number of copies of this power card in a fresh deck
    pub fn copies(&self) -> usize {
        match self {
            PowerKind::Steal => 5,
            PowerKind::HippiePower => 4,
            PowerKind::Busted => 3,
            PowerKind::Compost => 2,
            PowerKind::Potzilla => 1,
            PowerKind::Dandelion => 7,
            PowerKind::WeedKiller => 7,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerKind::Steal => {
                "Steal one full pot from another player (if you have an empty pot)."
            }
            PowerKind::HippiePower => "Destroy the smallest weed plant pot of a target player.",
            PowerKind::Busted => {
                "Destroy the largest weed plant pot of a target player and skip their next turn."
            }
            PowerKind::Compost => "Double the plant count of any one of your own weed plant pots.",
            PowerKind::Potzilla => "Destroys all pots of a targeted player.",
            PowerKind::Dandelion => {
                "Occupies one pot; adds no score and blocks win condition. Pesky weed!"
            }
            PowerKind::WeedKiller => "Remove a Dandelion from one of your pots.",
        }
    }

    /// Power cards that may only be aimed at another player
    pub fn must_target_opponent(&self) -> bool {
        matches!(
            self,
            PowerKind::Dandelion
                | PowerKind::Steal
                | PowerKind::HippiePower
                | PowerKind::Busted
                | PowerKind::Potzilla
        )
    }
}

impl fmt::Display for PowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PowerKind::Steal => "Steal",
                PowerKind::HippiePower => "Hippie Power",
                PowerKind::Busted => "Busted",
                PowerKind::Compost => "Compost",
                PowerKind::Potzilla => "Potzilla",
                PowerKind::Dandelion => "Dandelion",
                PowerKind::WeedKiller => "Weed Killer",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Plant { value: u32, base_value: u32 },
    Power { power: PowerKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub kind: CardKind,
    pub description: String,
}

impl Card {
    pub fn plant(value: u32, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: CardKind::Plant {
                value,
                base_value: value,
            },
            description: description.into(),
        }
    }

    pub fn power(power: PowerKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: CardKind::Power { power },
            description: power.description().to_string(),
        }
    }

    /// Current worth of a plant card, `None` for power cards
    pub fn plant_value(&self) -> Option<u32> {
        match self.kind {
            CardKind::Plant { value, .. } => Some(value),
            CardKind::Power { .. } => None,
        }
    }

    pub fn base_value(&self) -> Option<u32> {
        match self.kind {
            CardKind::Plant { base_value, .. } => Some(base_value),
            CardKind::Power { .. } => None,
        }
    }

    pub fn power_kind(&self) -> Option<PowerKind> {
        match self.kind {
            CardKind::Power { power } => Some(power),
            CardKind::Plant { .. } => None,
        }
    }

    pub fn is_plant(&self) -> bool {
        matches!(self.kind, CardKind::Plant { .. })
    }

    pub fn is_power(&self, kind: PowerKind) -> bool {
        self.power_kind() == Some(kind)
    }

    /// Copy of this plant card with its value restored to the base value
    pub fn with_base_value(&self) -> Self {
        let mut card = self.clone();
        if let CardKind::Plant { base_value, .. } = card.kind {
            card.kind = CardKind::Plant {
                value: base_value,
                base_value,
            };
        }
        card
    }

    /// Builds the full 54 card catalog with fresh ids, unshuffled
    pub fn catalog() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for (value, copies, description) in PLANT_DISTRIBUTION {
            for _ in 0..copies {
                cards.push(Card::plant(value, description));
            }
        }
        for kind in PowerKind::iter() {
            for _ in 0..kind.copies() {
                cards.push(Card::power(kind));
            }
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Plant { base_value, .. } => write!(f, "{}-plant", base_value),
            CardKind::Power { power } => write!(f, "{}", power),
        }
    }
}

/// Fresh catalog in a uniformly random order
pub fn new_shuffled_deck() -> Vec<Card> {
    let mut deck = Card::catalog();
    deck.shuffle(&mut rand::rng());
    deck
}
