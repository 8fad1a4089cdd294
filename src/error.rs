use thiserror::Error;

pub type Result<T> = std::result::Result<T, LadderError>;

/// Errors reported by ladder generation and layout construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LadderError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid layout at row {row}: {message}")]
    InvalidLayout { row: usize, message: String },
}

impl LadderError {
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_layout(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            row,
            message: message.into(),
        }
    }
}
