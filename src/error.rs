use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the ledger, the peer set and consensus resolution.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The chain holds no blocks. Unreachable once genesis is seeded.
    #[error("chain is empty")]
    EmptyChain,

    #[error("invalid peer address '{0}'")]
    InvalidAddress(String),

    #[error("at least one peer address is required")]
    MissingAddress,

    #[error("peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("invalid chain: {0}")]
    InvalidChain(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("difficulty {requested} is outside {min}..={max}")]
    InvalidDifficulty { requested: u32, min: u32, max: u32 },

    #[error("mining was cancelled")]
    MiningCancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidAddress(_)
            | LedgerError::MissingAddress
            | LedgerError::InvalidTransaction(_)
            | LedgerError::InvalidDifficulty { .. }
            | LedgerError::InvalidChain(_) => StatusCode::BAD_REQUEST,
            LedgerError::PeerUnreachable { .. } => StatusCode::BAD_GATEWAY,
            LedgerError::MiningCancelled => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::EmptyChain | LedgerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
