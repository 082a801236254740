use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {rows}x{cols} with {hazards} hazards")]
    InvalidConfiguration {
        rows: usize,
        cols: usize,
        hazards: usize,
    },
    #[error("Invalid coordinates ({0}, {1})")]
    InvalidCoordinate(usize, usize),
}

pub type Result<T> = core::result::Result<T, GameError>;
