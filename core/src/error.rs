use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BingoError {
    #[error("Invalid square position {0}")]
    InvalidPosition(usize),
    #[error("Square state index {0} is out of range")]
    InvalidSquareIndex(u8),
    #[error("Unknown square class {0:?}")]
    UnknownSquareClass(String),
    #[error("State token is not valid base64")]
    InvalidToken,
    #[error("State token covers {found} squares, board has {expected}")]
    TokenTooShort { expected: usize, found: usize },
    #[error("Square pool could not be parsed: {0}")]
    InvalidPool(String),
    #[error("Segment {0} has no squares")]
    EmptySegment(u32),
    #[error("Segment {segment} yields {available} squares, board needs {needed}")]
    NotEnoughSquares {
        segment: u32,
        needed: usize,
        available: usize,
    },
    #[error("Invalid guess {0:?}")]
    InvalidGuess(String),
    #[error("Could not access page URL: {0}")]
    Url(String),
}

pub type Result<T> = core::result::Result<T, BingoError>;
