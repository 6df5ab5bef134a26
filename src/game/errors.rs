use thiserror::Error;

use crate::game::cards::PowerKind;

/// Reasons a reducer refuses an action. The reducer boundary turns these into a log
/// entry on the unchanged state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error("Card not found in hand.")]
    CardNotInHand,
    #[error("Not a {0} card.")]
    WrongCard(&'static str),
    #[error("Pot {0} does not exist.")]
    PotOutOfRange(usize),
    #[error("Pot {pot} of {owner} is already full.")]
    PotOccupied { owner: String, pot: usize },
    #[error("{0} card must target another player.")]
    MustTargetOpponent(PowerKind),
    #[error("Pot does not contain a Dandelion.")]
    NoDandelionInPot,
    #[error("Pot does not contain a weed plant card.")]
    NoPlantInPot,
    #[error("Target pot is empty or has a Dandelion.")]
    NothingToSteal,
    #[error("Your chosen pot is not empty.")]
    OwnPotNotEmpty,
    #[error("Missing target: {0}")]
    MissingTarget(&'static str),
    #[error("It's not your turn!")]
    NotYourTurn,
    #[error("Your turn action is already done.")]
    TurnAlreadyDone,
    #[error("No turn is being played right now.")]
    NotPlaying,
    #[error("No target selection in progress.")]
    NoSelection,
    #[error("That target does not fit the card being played.")]
    InvalidTarget,
    #[error("The round is not over yet.")]
    RoundNotOver,
}
