//! Shots: the unit of input to the silent-video capability.

use crate::BlobLocation;
use serde::{Deserialize, Serialize};

/// A single scene as consumed by video generation: its text plus an optional
/// reference image.
///
/// The image is attached only when the story stage actually produced one;
/// absence is expected and must not be treated as an error downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Cleaned scene text
    pub text: String,
    /// Reference image for this shot, if one exists in the blob store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<BlobLocation>,
}

impl Shot {
    /// A text-only shot.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    /// A shot with a reference image.
    pub fn with_image(text: impl Into<String>, image: BlobLocation) -> Self {
        Self {
            text: text.into(),
            image: Some(image),
        }
    }
}
