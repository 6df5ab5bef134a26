pub mod basic_strategy;
pub mod solo;
pub mod types;

pub use basic_strategy::BasicBotStrategy;
pub use solo::SoloGame;
pub use types::BotStrategy;
