/// Convenience result type used across Actdraw.
pub type ActDrawResult<T> = Result<T, ActDrawError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The render path itself is infallible by design; errors only arise when
/// wiring or validating document data.
#[derive(thiserror::Error, Debug)]
pub enum ActDrawError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActDrawError {
    /// Build an [`ActDrawError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
