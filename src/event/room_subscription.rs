use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, room_handler::RoomEventHandler};

/// Feeds one room's events to one handler, strictly in order
pub struct RoomSubscription {
    room_id: String,
    handler: Arc<dyn RoomEventHandler>,
    event_bus: EventBus,
}

impl RoomSubscription {
    pub fn new(room_id: String, handler: Arc<dyn RoomEventHandler>, event_bus: EventBus) -> Self {
        Self {
            room_id,
            handler,
            event_bus,
        }
    }

    /// Subscribes before returning, so no event emitted afterwards is missed, then
    /// spawns the task that drives the handler until the room channel closes
    pub async fn start(self) -> JoinHandle<()> {
        let room_id = self.room_id.clone();
        let handler_name = self.handler.handler_name();
        let mut receiver = self.event_bus.subscribe_to_room(&room_id).await;

        info!(
            room_id = %room_id,
            handler = handler_name,
            "Room subscription started"
        );

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            room_id = %room_id,
                            handler = handler_name,
                            skipped,
                            "Room subscription lagged, events dropped"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(
                    room_id = %room_id,
                    handler = handler_name,
                    event = event.event_type(),
                    "Received room event"
                );

                if let Err(e) = self.handler.handle_room_event(&room_id, event).await {
                    warn!(
                        room_id = %room_id,
                        handler = handler_name,
                        error = %e,
                        "Room event handler failed"
                    );
                }
            }

            info!(
                room_id = %room_id,
                handler = handler_name,
                "Room subscription ended"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{RoomEvent, RoomEventError};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RoomEventHandler for RecordingHandler {
        async fn handle_room_event(
            &self,
            _room_id: &str,
            event: RoomEvent,
        ) -> Result<(), RoomEventError> {
            self.seen.lock().await.push(event.event_type().to_string());
            if matches!(event, RoomEvent::TryStartGame { .. }) {
                return Err(RoomEventError::HandlerError("refused".to_string()));
            }
            Ok(())
        }

        fn handler_name(&self) -> &'static str {
            "RecordingHandler"
        }
    }

    #[tokio::test]
    async fn test_events_handled_in_order_despite_errors() {
        let bus = EventBus::new();
        let handler = Arc::new(RecordingHandler {
            seen: Mutex::new(Vec::new()),
        });
        let handle = RoomSubscription::new("room".to_string(), handler.clone(), bus.clone())
            .start()
            .await;

        bus.emit_to_room(
            "room",
            RoomEvent::TryStartGame {
                player_id: "p1".to_string(),
            },
        )
        .await;
        bus.emit_to_room(
            "room",
            RoomEvent::StateRequested {
                player_id: "p1".to_string(),
            },
        )
        .await;
        bus.close_room("room").await;
        handle.await.unwrap();

        assert_eq!(
            *handler.seen.lock().await,
            vec!["try_start_game".to_string(), "state_requested".to_string()]
        );
    }
}
