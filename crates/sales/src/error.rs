//! Failures while evaluating one action.

use thiserror::Error;

use crate::ports::LookupKind;

/// A query port could not answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{lookup} lookup unavailable: {detail}")]
    Unavailable { lookup: LookupKind, detail: String },

    #[error("{lookup} lookup returned malformed data: {detail}")]
    Malformed { lookup: LookupKind, detail: String },
}

impl LookupError {
    pub fn unavailable(lookup: LookupKind, detail: impl Into<String>) -> Self {
        Self::Unavailable {
            lookup,
            detail: detail.into(),
        }
    }

    pub fn malformed(lookup: LookupKind, detail: impl Into<String>) -> Self {
        Self::Malformed {
            lookup,
            detail: detail.into(),
        }
    }
}

/// Why a single action's decision could not be computed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("could not build link: {0}")]
    Link(#[from] url::ParseError),
}
