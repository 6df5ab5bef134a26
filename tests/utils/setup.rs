use std::sync::Arc;

use growpot::{
    event::EventBus,
    game::{GameService, GameState},
    shared::AppState,
    websockets::WebsocketReceiveHandler,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A hosted room with seated players and running room subscriptions
pub struct TestSetup {
    pub app_state: AppState,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub game_id: String,
    /// (name, player id) in seat order; the first one is the host
    pub players: Vec<(String, String)>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["Alice", "Bob"])
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["Alice", "Bob", "Carol"])
    }

    pub async fn build(self) -> TestSetup {
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let app_state = AppState::new(
            Arc::new(GameService::new()),
            mock_conn_manager.clone(),
            EventBus::new(),
        );

        let mut names = self.players.into_iter();
        let host_name = names.next().unwrap_or_else(|| "Host".to_string());
        let hosted = app_state.game_service.host_game(&host_name).await.unwrap();
        let game_id = hosted.game_id.clone();

        let mut players = vec![(host_name, hosted.player_id)];
        for name in names {
            let joined = app_state
                .game_service
                .join_game(&game_id, &name, None)
                .await
                .unwrap();
            players.push((name, joined.player_id));
        }

        for (_, player_id) in &players {
            mock_conn_manager.add_connected_player(player_id).await;
        }

        app_state.start_room_subscriptions(&game_id).await;
        let input_handler = WebsocketReceiveHandler::new(app_state.event_bus.clone());

        TestSetup {
            app_state,
            mock_conn_manager,
            input_handler,
            game_id,
            players,
        }
    }
}

#[allow(dead_code)]
impl TestSetup {
    pub fn id_of(&self, name: &str) -> String {
        self.players
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.clone())
            .unwrap_or_else(|| panic!("no player named {}", name))
    }

    pub async fn state(&self) -> GameState {
        self.app_state
            .game_service
            .get_state(&self.game_id)
            .await
            .unwrap()
    }

    /// Name and id of the player whose turn it is
    pub async fn current_player(&self) -> (String, String) {
        let state = self.state().await;
        let player = state.current_player().unwrap();
        (player.name.clone(), player.id.clone())
    }
}
