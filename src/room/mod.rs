// Public API - what other modules can use
pub use handlers::{get_game, health, host_game, join_game};
pub use types::{HostGameRequest, HostGameResponse, JoinGameRequest, JoinGameResponse};

// Internal modules
mod handlers;
mod types;
