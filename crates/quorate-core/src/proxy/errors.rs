use crate::{
    consensus::ConsensusError, middleware::validation::ValidationError, wire::WireError,
};

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const CONSENSUS_ERROR: i32 = -32000;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(ValidationError),

    #[error("invalid argument {index}: {source}")]
    InvalidArgument {
        index: usize,
        #[source]
        source: WireError,
    },

    #[error("missing value for required argument {index}")]
    MissingArgument { index: usize },

    #[error("too many arguments, want at most {max}")]
    TooManyArguments { max: usize },

    /// Backends could not agree. Displays the resolver message verbatim.
    #[error("{0}")]
    Consensus(#[from] ConsensusError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ProxyError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl ProxyError {
    /// JSON-RPC error code for this failure.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Validation(
                ValidationError::InvalidVersion(_) | ValidationError::InvalidMethod(_),
            ) => INVALID_REQUEST,
            Self::Validation(ValidationError::MethodNotAllowed(_)) => METHOD_NOT_FOUND,
            Self::Validation(ValidationError::InvalidParams) |
            Self::InvalidArgument { .. } |
            Self::MissingArgument { .. } |
            Self::TooManyArguments { .. } => INVALID_PARAMS,
            Self::Consensus(_) => CONSENSUS_ERROR,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}
