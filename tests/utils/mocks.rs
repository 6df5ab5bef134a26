use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use growpot::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every outbound frame per player instead of writing to sockets
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    connected_players: Arc<RwLock<Vec<String>>>,
}

#[allow(dead_code)]
impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected_players: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn add_connected_player(&self, player_id: &str) {
        self.connected_players
            .write()
            .await
            .push(player_id.to_string());
    }

    pub async fn is_connected(&self, player_id: &str) -> bool {
        self.connected_players
            .read()
            .await
            .iter()
            .any(|p| p == player_id)
    }

    pub async fn get_messages_for(&self, player_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(player_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes and returns the oldest message sent to `player_id`
    pub async fn consume_message_for(&self, player_id: &str) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(player_id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, player_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_player(&player_id).await;
    }

    async fn remove_connection(&self, player_id: &str) {
        self.connected_players
            .write()
            .await
            .retain(|p| p != player_id);
    }

    async fn send_to_player(&self, player_id: &str, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(player_id.to_string())
            .or_default()
            .push_back(message.to_string());
    }

    async fn send_to_players(&self, player_ids: &[String], message: &str) {
        for player_id in player_ids {
            self.send_to_player(player_id, message).await;
        }
    }
}
