//! Application core: form state, upload slots, request validation and the
//! generation cycle. Everything here is UI-independent so the behavior can be
//! tested without a live window.

use thiserror::Error;

pub mod dispatch;
pub mod encode;
pub mod gallery;
pub mod request;
pub mod state;

pub use dispatch::{run_cycle, StudioConfig};
pub use encode::encode_image_file;
pub use gallery::{download_filename, GalleryImage};
pub use request::{build_request, AspectRatio, GenerationRequest};
pub use state::{SlotId, StudioMode, StudioState, UploadedImage};

/// Errors raised by the studio itself, as opposed to the transport layer.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("the selected file is not an image (detected type: {mime_type})")]
    NotAnImage { mime_type: String },

    #[error("{0} is required for this mode")]
    MissingImage(SlotId),

    #[error("the prompt must not be empty")]
    EmptyPrompt,

    #[error("could not read the selected file: {source}")]
    FileRead {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    Remote(#[from] crate::error::Error),
}

impl StudioError {
    /// The message shown to the user. Remote failures collapse to one generic
    /// message; everything else is specific enough to show as-is.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote(_) => "Image generation failed. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}
