//! Error types returned by fallible board, config and game operations.
use crate::board::Piece;

/// A piece was dropped into a column that cannot take it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidMoveError {
    #[error("column {column} is out of range for a board with {columns} columns")]
    OutOfRange { column: u8, columns: u8 },

    #[error("column {0} is full")]
    ColumnFull(u8),
}

/// Errors that can occur when parsing a board diagram.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BoardParseError {
    #[error("invalid board syntax near {0:?}")]
    Syntax(String),

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("board shape {rows}x{columns} is not supported")]
    Shape { rows: usize, columns: usize },

    #[error("piece at row {row}, column {column} is floating above an empty cell")]
    Floating { row: u8, column: u8 },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that abort a game played by [crate::util::bot_game].
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("bot playing {0:?} returned no move while the game is not over")]
    MissingMove(Piece),

    #[error("bot playing {piece:?} selected an illegal move: {source}")]
    IllegalMove {
        piece: Piece,
        #[source]
        source: InvalidMoveError,
    },
}
