use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::game::state::GameState;

/// Handle to one room's state. Holding the lock is what makes a command atomic.
pub type RoomHandle = Arc<Mutex<GameState>>;

/// Rooms keyed by room id, each behind its own lock
pub struct GameRepository {
    games: Arc<RwLock<HashMap<String, RoomHandle>>>,
}

impl Default for GameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a new room; returns false when the id is already taken
    pub async fn insert_game(&self, room_id: &str, state: GameState) -> bool {
        let mut games = self.games.write().await;
        if games.contains_key(room_id) {
            return false;
        }
        games.insert(room_id.to_string(), Arc::new(Mutex::new(state)));
        debug!(room_id = %room_id, rooms = games.len(), "Room stored");
        true
    }

    pub async fn get_handle(&self, room_id: &str) -> Option<RoomHandle> {
        let games = self.games.read().await;
        games.get(room_id).cloned()
    }

    /// Snapshot of a room's current state
    pub async fn get_game(&self, room_id: &str) -> Option<GameState> {
        let handle = self.get_handle(room_id).await?;
        let state = handle.lock().await;
        Some(state.clone())
    }

    pub async fn remove_game(&self, room_id: &str) -> Option<GameState> {
        let handle = {
            let mut games = self.games.write().await;
            games.remove(room_id)?
        };
        debug!(room_id = %room_id, "Room removed");
        let state = handle.lock().await;
        Some(state.clone())
    }

    pub async fn room_count(&self) -> usize {
        self.games.read().await.len()
    }
}
