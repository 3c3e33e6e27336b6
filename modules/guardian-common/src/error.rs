use thiserror::Error;

/// Rejections surfaced to the caller. Generation failures never appear here;
/// they are absorbed by the news fallback chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid transportation type: {0}")]
    UnknownTransportation(String),

    #[error("Invalid energy type: {0}")]
    UnknownEnergy(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("This city has been eliminated: {0}")]
    CityEliminated(String),

    #[error("Unsupported news type: {0}")]
    UnknownCategory(String),

    #[error("Severity must be 'low', 'medium', or 'high' (got '{0}')")]
    InvalidSeverity(String),

    #[error("Game over! Please restart the game.")]
    GameOver,
}
