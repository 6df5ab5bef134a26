//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use tokio::time::{sleep, Duration};

use growpot::{
    game::{GamePhase, GameState},
    websockets::{MessageType, WebSocketMessage},
};

use super::setup::TestSetup;

const POLL_ATTEMPTS: usize = 100;
const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    players: Vec<String>, // player ids
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all players in the setup
    pub fn for_all_players(setup: &'a TestSetup) -> Self {
        let players = setup.players.iter().map(|(_, id)| id.clone()).collect();
        Self { setup, players }
    }

    /// Create an assertion for specific players, by name
    pub fn for_players(setup: &'a TestSetup, names: Vec<&str>) -> Self {
        let players = names.into_iter().map(|name| setup.id_of(name)).collect();
        Self { setup, players }
    }

    async fn next_message_for(&self, player_id: &str) -> Option<WebSocketMessage> {
        for _ in 0..POLL_ATTEMPTS {
            if let Some(raw) = self
                .setup
                .mock_conn_manager
                .consume_message_for(player_id)
                .await
            {
                return Some(serde_json::from_str(&raw).unwrap());
            }
            sleep(POLL_INTERVAL).await;
        }
        None
    }

    /// Assert that players received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for player in &self.players {
            let message = self.next_message_for(player).await;
            let msg = message.unwrap_or_else(|| panic!("{} should have received a message", player));
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                player
            );
            messages.push(msg);
        }

        // Every recipient sees the same payload
        let first_payload = &messages[0].payload;
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                &msg.payload, first_payload,
                "Player {} payload differs from player {}",
                self.players[i], self.players[0]
            );
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that players received no messages
    pub async fn received_no_messages(self) {
        sleep(Duration::from_millis(50)).await;
        for player in &self.players {
            let messages = self.setup.mock_conn_manager.get_messages_for(player).await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                player,
                messages
            );
        }
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    payload: serde_json::Value,
}

impl MessageContent {
    /// Assert the payload carries a specific message text
    pub fn with_message(self, expected: &str) -> Self {
        assert_eq!(self.payload["message"], expected);
        self
    }

    pub fn with_phase(self, expected: GamePhase) -> Self {
        assert_eq!(self.state().game_phase, expected);
        self
    }

    pub fn with_player_count(self, expected: usize) -> Self {
        assert_eq!(self.state().players.len(), expected);
        self
    }

    pub fn with_current_player(self, expected_id: &str) -> Self {
        let state = self.state();
        assert_eq!(state.current_player().unwrap().id, expected_id);
        self
    }

    pub fn state(&self) -> GameState {
        serde_json::from_value(self.payload["state"].clone()).unwrap()
    }
}
