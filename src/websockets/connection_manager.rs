use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Outbound side of every open socket, keyed by player id
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, player_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, player_id: &str);

    async fn send_to_player(&self, player_id: &str, message: &str);

    async fn send_to_players(&self, player_ids: &[String], message: &str);
}

pub struct InMemoryConnectionManager {
    // player id -> sender
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, player_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(player_id, sender);
    }

    async fn remove_connection(&self, player_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(player_id);
    }

    async fn send_to_player(&self, player_id: &str, message: &str) {
        let connections = self.connections.read().await;
        match connections.get(player_id) {
            Some(sender) => {
                let _ = sender.send(message.to_string());
            }
            None => debug!(player_id = %player_id, "No open connection for player"),
        }
    }

    async fn send_to_players(&self, player_ids: &[String], message: &str) {
        let connections = self.connections.read().await;
        for player_id in player_ids {
            if let Some(sender) = connections.get(player_id) {
                let _ = sender.send(message.to_string());
            }
        }
    }
}
