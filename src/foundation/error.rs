/// Convenience result type used across Programation.
pub type ProgResult<T> = Result<T, ProgError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ProgError {
    /// Non-numeric transform parameters, malformed bounds, points or output settings.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A child reference that does not name a live shape of the scene.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Adding the child would make the shape tree reference itself.
    #[error("cycle detected: {0}")]
    CycleDetected(String),

    /// Unparseable color specification.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Interpolating point arrays of different shapes.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Failures while driving the external encoder process.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProgError {
    /// Build a [`ProgError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`ProgError::InvalidShape`] value.
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Build a [`ProgError::CycleDetected`] value.
    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::CycleDetected(msg.into())
    }

    /// Build a [`ProgError::InvalidColor`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Build a [`ProgError::ShapeMismatch`] value.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Build a [`ProgError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
