/// Convenience result type used across formplate.
pub type FormplateResult<T> = Result<T, FormplateError>;

/// Top-level error taxonomy used by compositor and preview APIs.
///
/// Every variant aborts the render it was raised in. None of them are retried by the crate.
#[derive(thiserror::Error, Debug)]
pub enum FormplateError {
    /// A template image or icon could not be read or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Signature bytes supplied by the caller could not be decoded into pixels.
    #[error("signature decode error: {0}")]
    SignatureDecode(String),

    /// The final raster could not be encoded as PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// Compiled-in layout data is inconsistent (missing position, unmapped question).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid caller-provided settings or input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormplateError {
    /// Build a [`FormplateError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`FormplateError::SignatureDecode`] value.
    pub fn signature_decode(msg: impl Into<String>) -> Self {
        Self::SignatureDecode(msg.into())
    }

    /// Build a [`FormplateError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FormplateError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FormplateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
