use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    #[error("Input has to be a Positive Number!")]
    Validation,

    #[error("Coordinates must be finite numbers")]
    InvalidCoords,

    #[error("Unknown workout type: {0:?} (expected \"running\" or \"cycling\")")]
    UnknownKind(String),
}
