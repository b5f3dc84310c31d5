use thiserror::Error;

/// Errors raised by the window generator and the homology scanner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecombError {
    /// A window length or start offset that the sequence cannot satisfy
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RecombError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RecombError>;
