// SPDX-License-Identifier: MPL-2.0
//! Image source port.
//!
//! An [`ImageSource`] turns portable image descriptions into opaque,
//! revocable [`ImageRef`] handles. The grid engine calls
//! [`ImageSource::release`] exactly once per handle, and only after every
//! widget displaying it has been torn down.

use crate::domain::grid::{ImageDimensions, ImageRef, PortableImage};
use std::fmt;

// =============================================================================
// ImageSourceError
// =============================================================================

/// Errors that can occur while acquiring an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSourceError {
    /// The referenced file does not exist.
    NotFound(String),

    /// The bytes could not be read.
    Io(String),

    /// The data is not in a supported image format.
    UnsupportedFormat,

    /// The data URL is malformed.
    MalformedDataUrl,

    /// The image decoded to a zero-sized picture.
    InvalidDimensions {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },

    /// The image data is corrupted.
    Decode(String),
}

impl fmt::Display for ImageSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSourceError::NotFound(what) => write!(f, "Image not found: {what}"),
            ImageSourceError::Io(msg) => write!(f, "I/O error: {msg}"),
            ImageSourceError::UnsupportedFormat => write!(f, "Unsupported image format"),
            ImageSourceError::MalformedDataUrl => write!(f, "Malformed data URL"),
            ImageSourceError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
            ImageSourceError::Decode(msg) => write!(f, "Corrupted image data: {msg}"),
        }
    }
}

impl std::error::Error for ImageSourceError {}

// =============================================================================
// ImageSource Trait
// =============================================================================

/// Acquires and releases image handles.
pub trait ImageSource {
    /// Loads `image` and returns a fresh handle to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be found, read or decoded.
    fn acquire(&mut self, image: &PortableImage) -> Result<ImageRef, ImageSourceError>;

    /// Natural size of a live handle, or `None` for an unknown handle.
    fn dimensions(&self, image: ImageRef) -> Option<ImageDimensions>;

    /// Portable form of a live handle, used when saving a project.
    fn export(&self, image: ImageRef) -> Option<PortableImage>;

    /// Revokes a handle. Called exactly once per acquired handle.
    fn release(&mut self, image: ImageRef);
}
