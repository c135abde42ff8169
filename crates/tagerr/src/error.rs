use thiserror::Error;

/// Invalid-usage failures raised by construction and conversion.
///
/// These signal programmer error, not recoverable runtime conditions; the
/// crate never retries, logs, or swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("The argument \"{argument}\" cannot be null.")]
    ArgumentNull { argument: &'static str },
    #[error("The argument \"{argument}\" is invalid.")]
    Argument { argument: &'static str },
}

pub type Result<T> = std::result::Result<T, TagError>;
