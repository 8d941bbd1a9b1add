//! Errors used throughout the chess core.
//!
//! Parsing failures are reported to the caller, never defaulted. A perft count
//! mismatch is not an error; it is a `FAILED` row in the report.

/// Unified error type for the crate.
#[derive(thiserror::Error, Debug)]
pub enum ChessError {
    /// A board description (FEN) is missing a field, has the wrong number of
    /// squares in a rank, or carries an unparseable value.
    #[error("malformed board description: {0}")]
    MalformedDescription(String),

    /// An expected-results annotation lacks its `D` prefix, or carries a
    /// non-integer depth or count.
    #[error("malformed perft expectation: {0}")]
    MalformedExpectation(String),

    /// `unmake_move` was called out of LIFO order or without a matching make.
    /// Unreachable from correct callers.
    #[error("unmake discipline violated: token issued at ply {token_ply}, position is at ply {position_ply}")]
    UnmakeDiscipline { token_ply: u32, position_ply: u32 },

    /// The external perft source could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn description(msg: impl Into<String>) -> Self {
        ChessError::MalformedDescription(msg.into())
    }

    pub(crate) fn expectation(msg: impl Into<String>) -> Self {
        ChessError::MalformedExpectation(msg.into())
    }
}
