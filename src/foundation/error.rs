/// Convenience result type used across metromorph.
pub type MetroResult<T> = Result<T, MetroError>;

/// Top-level error taxonomy. Every variant is fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum MetroError {
    /// Invalid dataset or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame (missing font, bad canvas).
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing stills or assembling the animation.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing the dataset.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MetroError {
    /// Build a [`MetroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MetroError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MetroError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MetroError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
