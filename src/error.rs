use std::path::PathBuf;

/// Errors raised when building an engine from an externally supplied board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("both players have four in a row")]
    BothPlayersWon,

    #[error("floating piece: empty cell at row {row}, column {col} sits under a piece")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors surfaced by the game session layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("game session not found: {0}")]
    NotFound(String),

    #[error("it is not the human player's turn")]
    NotYourTurn,

    #[error("invalid move: column {0}")]
    InvalidMove(i64),

    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur while playing evaluation matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainingError {
    #[error("agent {agent} selected illegal action {action} (legal: {legal:?})")]
    IllegalAction {
        agent: String,
        action: usize,
        legal: Vec<usize>,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::InvalidCell {
            row: 2,
            col: 4,
            value: 9,
        };
        assert_eq!(err.to_string(), "invalid cell value 9 at row 2, column 4");

        let err = EngineError::FloatingPiece { row: 1, col: 3 };
        assert_eq!(
            err.to_string(),
            "floating piece: empty cell at row 1, column 3 sits under a piece"
        );
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "game session not found: abc");
        assert_eq!(
            SessionError::InvalidMove(-1).to_string(),
            "invalid move: column -1"
        );
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::IllegalAction {
            agent: "Random".to_string(),
            action: 5,
            legal: vec![0, 1, 2],
        };
        assert_eq!(
            err.to_string(),
            "agent Random selected illegal action 5 (legal: [0, 1, 2])"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("session.ttl_secs must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: session.ttl_secs must be > 0"
        );
    }
}
