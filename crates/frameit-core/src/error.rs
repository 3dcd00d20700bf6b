//! Crate-level error type for the editor.

use std::fmt;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Which of the two input images an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The user's photo.
    Photo,
    /// The decorative frame drawn on top.
    Overlay,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Photo => f.write_str("photo"),
            Layer::Overlay => f.write_str("overlay"),
        }
    }
}

/// Errors surfaced by the editor session and engine initialization.
#[derive(Debug, Error)]
pub enum EditorError {
    /// One of the images failed to decode.
    #[error("Failed to decode {layer} image: {source}")]
    Decode {
        layer: Layer,
        #[source]
        source: DecodeError,
    },

    /// A decoded image has a zero dimension or a malformed pixel buffer.
    #[error("Invalid {layer} image: {width}x{height}")]
    InvalidImage { layer: Layer, width: u32, height: u32 },

    /// Encoding the composite failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A newer load was started before this one finished.
    #[error("Load {ticket} was superseded by load {latest}")]
    StaleLoad { ticket: u32, latest: u32 },

    /// The operation needs a loaded photo.
    #[error("No photo loaded")]
    NotLoaded,
}

impl EditorError {
    pub(crate) fn decode(layer: Layer) -> impl FnOnce(DecodeError) -> Self {
        move |source| EditorError::Decode { layer, source }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
