use serde_json::json;
use tokio::time::{sleep, Duration};

use growpot::{
    event::RoomEvent,
    game::{ActionType, PlayerActionPayload},
    websockets::{MessageHandler, MessageType, WebSocketMessage},
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

#[allow(dead_code)]
impl TestSetup {
    /// Feed a client frame through the receive handler and give the room time to react
    pub async fn send_message(&self, player_id: &str, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.input_handler
            .handle_message(player_id, &self.game_id, message_json)
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    pub async fn send_raw(&self, player_id: &str, raw: &str) {
        self.input_handler
            .handle_message(player_id, &self.game_id, raw.to_string())
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Emit a room event and wait for processing
    pub async fn emit_event(&self, event: RoomEvent) {
        self.app_state
            .event_bus
            .emit_to_room(&self.game_id, event)
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_start_game(&self, player_id: &str) {
        self.send_message(
            player_id,
            WebSocketMessage::new(MessageType::StartGame, json!({})),
        )
        .await;
    }

    pub async fn send_start_next_round(&self, player_id: &str) {
        self.send_message(
            player_id,
            WebSocketMessage::new(MessageType::StartNextRound, json!({})),
        )
        .await;
    }

    pub async fn send_request_state(&self, player_id: &str) {
        self.send_message(
            player_id,
            WebSocketMessage::new(MessageType::RequestState, json!({})),
        )
        .await;
    }

    pub async fn send_action(&self, player_id: &str, payload: PlayerActionPayload) {
        let message = WebSocketMessage::new(
            MessageType::PlayerAction,
            serde_json::to_value(payload).unwrap(),
        );
        self.send_message(player_id, message).await;
    }

    pub async fn send_discard(&self, player_id: &str, card_id: &str) {
        self.send_action(
            player_id,
            PlayerActionPayload {
                action_type: ActionType::DiscardCard,
                card_id: card_id.to_string(),
                target_player_id: None,
                pot_index: None,
                self_pot_index: None,
            },
        )
        .await;
    }

    /// Discard the first card in the current player's hand
    pub async fn current_player_discards(&self) -> String {
        let state = self.state().await;
        let player = state.current_player().unwrap();
        let card_id = player.hand[0].id.clone();
        self.send_discard(&player.id, &card_id).await;
        player.id.clone()
    }

    /// What the socket handler does when a client goes away
    pub async fn disconnect(&self, player_id: &str) {
        self.emit_event(RoomEvent::PlayerDisconnected {
            player_id: player_id.to_string(),
        })
        .await;
    }
}
