use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Attempt already ended, no new reveals are accepted")]
    AlreadyEnded,
    #[error("Joker already used for this attempt")]
    JokerUnavailable,
    #[error("Retry is only possible after hitting a bomb")]
    NotLost,
    #[error("Level is not cleared yet")]
    NotCleared,
}

pub type Result<T> = core::result::Result<T, GameError>;
