use crate::game::{GameState, PlayerAction};

/// Trait for AI decision-making strategies
pub trait BotStrategy: Send + Sync {
    /// Pick the next move for `bot_id`. Falls back to `EndTurn` when nothing fits.
    fn decide_move(&self, state: &GameState, bot_id: &str) -> PlayerAction;

    /// Get the name of this strategy
    fn strategy_name(&self) -> &'static str;
}
