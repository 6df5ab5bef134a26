// A GameState is the snapshot every reducer consumes and returns. Players keep their seat
// order for the whole game; the draw pile is a stack whose end is the top card.

use serde::{Deserialize, Serialize};

use crate::game::cards::{Card, PowerKind};
use crate::game::selection::PendingSelection;

pub const NUM_POTS: usize = 5;
pub const STARTING_HAND_SIZE: usize = 5;
pub const WINNING_SCORE: u32 = 50;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const MAX_LOG_ENTRIES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Setup,
    Playing,
    TargetingPlayer,
    TargetingPlayerPot,
    TargetingSelfPot,
    RoundOver,
    GameOver,
    MultiplayerLobby,
}

impl GamePhase {
    /// Whether turns are being taken (including mid-selection)
    pub fn is_in_play(&self) -> bool {
        matches!(
            self,
            GamePhase::Playing
                | GamePhase::TargetingPlayer
                | GamePhase::TargetingPlayerPot
                | GamePhase::TargetingSelfPot
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub id: String,
    pub card: Option<Card>,
}

impl Pot {
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    pub fn plant_value(&self) -> Option<u32> {
        self.card.as_ref().and_then(Card::plant_value)
    }

    pub fn has_plant(&self) -> bool {
        self.plant_value().is_some()
    }

    pub fn has_dandelion(&self) -> bool {
        self.card
            .as_ref()
            .is_some_and(|c| c.is_power(PowerKind::Dandelion))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub hand: Vec<Card>,
    pub pots: [Pot; NUM_POTS],
    pub score: u32,
    pub round_score: u32,
    pub is_skipped: bool,
    #[serde(default)]
    pub is_host: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let pots = std::array::from_fn(|i| Pot {
            id: format!("pot-{}-{}", id, i),
            card: None,
        });
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            pots,
            score: 0,
            round_score: 0,
            is_skipped: false,
            is_host: false,
        }
    }

    pub fn card_in_hand(&self, card_id: &str) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Sum of current plant values across all pots; dandelions count zero
    pub fn pot_plant_total(&self) -> u32 {
        self.pots.iter().filter_map(Pot::plant_value).sum()
    }

    /// All five pots are filled and every one of them holds a plant
    pub fn has_full_garden(&self) -> bool {
        self.pots.iter().all(Pot::has_plant)
    }

    pub fn first_empty_pot(&self) -> Option<usize> {
        self.pots.iter().position(Pot::is_empty)
    }

    pub fn occupied_pot_count(&self) -> usize {
        self.pots.iter().filter(|p| !p.is_empty()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: Option<String>,
    pub players: Vec<Player>,
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub current_player_index: usize,
    pub game_phase: GamePhase,
    pub round_winner: Option<Player>,
    pub game_winner: Option<Player>,
    pub game_log: Vec<String>,
    pub message: String,
    pub target_selection: Option<PendingSelection>,
    pub turn_action_done: bool,
}

impl GameState {
    /// Empty state in the given phase; dealing happens in the lifecycle module
    pub fn new(players: Vec<Player>, game_phase: GamePhase) -> Self {
        Self {
            game_id: None,
            players,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            current_player_index: 0,
            game_phase,
            round_winner: None,
            game_winner: None,
            game_log: Vec::new(),
            message: String::new(),
            target_selection: None,
            turn_action_done: false,
        }
    }

    /// Appends an entry, keeping only the most recent `MAX_LOG_ENTRIES`
    pub fn add_log(&mut self, entry: impl Into<String>) {
        self.game_log.push(entry.into());
        if self.game_log.len() > MAX_LOG_ENTRIES {
            let overflow = self.game_log.len() - MAX_LOG_ENTRIES;
            self.game_log.drain(0..overflow);
        }
    }

    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn is_current_player(&self, player_id: &str) -> bool {
        self.current_player().is_some_and(|p| p.id == player_id)
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    /// Total cards across hands, pots, draw pile and discard pile
    pub fn card_count(&self) -> usize {
        let held: usize = self
            .players
            .iter()
            .map(|p| p.hand.len() + p.occupied_pot_count())
            .sum();
        held + self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn player_ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }
}
