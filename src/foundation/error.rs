/// Convenience result type used across morphfield.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-frame math (shape generation, scheduling, interpolation) is total and never produces
/// one of these; errors only surface at configuration, backend and host boundaries.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid user-provided configuration or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside a render backend (released surface, bad upload sizes).
    #[error("render error: {0}")]
    Render(String),

    /// Host lifecycle misuse.
    #[error("host error: {0}")]
    Host(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MorphError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`MorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
