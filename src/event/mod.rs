// Event-driven plumbing for rooms
//
// Every room has its own broadcast channel. Handlers subscribe per room and
// process that room's events one at a time.

// Public API - what other modules can use
pub use bus::{EventBus, DEFAULT_ROOM_CAPACITY};
pub use events::RoomEvent;
pub use room_handler::{RoomEventError, RoomEventHandler};
pub use room_subscription::RoomSubscription;

// Internal modules
mod bus;
mod events;
mod room_handler;
mod room_subscription;
