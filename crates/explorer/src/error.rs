use crate::timeline::PlaybackState;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplorerError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Index {index} is out of range for {len} items")]
    OutOfRange { index: usize, len: usize },

    #[error("The deck has no cards left")]
    DeckExhausted,

    #[error("The timeline has no frames")]
    EmptyTimeline,

    #[error("Cannot {action} the timeline while it is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: PlaybackState,
    },
}
