// Public API
pub use actions::{apply_action, ActionType, PlayerAction, PlayerActionPayload};
pub use cards::{Card, CardKind, PowerKind};
pub use errors::ActionError;
pub use game_room_subscriber::GameEventRoomSubscriber;
pub use lobby::{JoinOutcome, LobbyError};
pub use selection::{PendingSelection, SelectionTarget};
pub use service::{ActionOutcome, GameService, HostedGame, JoinedGame, LeaveOutcome};
pub use state::{GamePhase, GameState, Player, Pot};

// Game rules, usable without the server
pub mod actions;
pub mod cards;
pub mod errors;
pub mod lifecycle;
pub mod lobby;
pub mod reducers;
pub mod selection;
pub mod state;

// Server-side room handling
mod game_room_subscriber;
mod repository;
mod service;

#[cfg(test)]
pub(crate) mod test_utils;
