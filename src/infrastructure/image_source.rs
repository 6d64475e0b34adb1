// SPDX-License-Identifier: MPL-2.0
//! Image source backed by the `image` crate.
//!
//! Files and `data:` URLs are decoded once on acquire to validate them and
//! read their dimensions; only the portable origin and the dimensions are
//! kept afterwards.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image_rs::GenericImageView;
use tracing::{debug, warn};

use crate::application::port::{ImageSource, ImageSourceError};
use crate::domain::grid::{ImageDimensions, ImageRef, PortableImage};

#[derive(Debug, Clone)]
struct Entry {
    origin: PortableImage,
    dimensions: ImageDimensions,
}

/// Decodes images from disk or inline data.
#[derive(Debug, Default)]
pub struct DecodedImageSource {
    entries: HashMap<u64, Entry>,
    next_id: u64,
}

impl DecodedImageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of acquired references not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    /// Reads an image file into a self-contained data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not an image.
    pub fn inline(path: impl AsRef<Path>) -> Result<PortableImage, ImageSourceError> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let format =
            image_rs::guess_format(&bytes).map_err(|_| ImageSourceError::UnsupportedFormat)?;
        Ok(PortableImage::DataUrl(encode_data_url(
            format.to_mime_type(),
            &bytes,
        )))
    }
}

impl ImageSource for DecodedImageSource {
    fn acquire(&mut self, image: &PortableImage) -> Result<ImageRef, ImageSourceError> {
        let bytes = match image {
            PortableImage::Path(path) => read_file(path)?,
            PortableImage::DataUrl(url) => decode_data_url(url)?,
        };
        let dimensions = decode_dimensions(&bytes)?;

        self.next_id += 1;
        let id = self.next_id;
        self.entries.insert(
            id,
            Entry {
                origin: image.clone(),
                dimensions,
            },
        );
        debug!(
            image = %image.label(),
            width = dimensions.width,
            height = dimensions.height,
            "image acquired"
        );
        Ok(ImageRef::from_raw(id))
    }

    fn dimensions(&self, image: ImageRef) -> Option<ImageDimensions> {
        self.entries.get(&image.raw()).map(|e| e.dimensions)
    }

    fn export(&self, image: ImageRef) -> Option<PortableImage> {
        self.entries.get(&image.raw()).map(|e| e.origin.clone())
    }

    fn release(&mut self, image: ImageRef) {
        if self.entries.remove(&image.raw()).is_none() {
            warn!(%image, "release of unknown image reference");
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ImageSourceError> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ImageSourceError::NotFound(path.display().to_string()),
        _ => ImageSourceError::Io(e.to_string()),
    })
}

fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions, ImageSourceError> {
    image_rs::guess_format(bytes).map_err(|_| ImageSourceError::UnsupportedFormat)?;
    let img =
        image_rs::load_from_memory(bytes).map_err(|e| ImageSourceError::Decode(e.to_string()))?;
    let (width, height) = img.dimensions();
    ImageDimensions::new(width, height)
        .ok_or(ImageSourceError::InvalidDimensions { width, height })
}

/// Extracts the payload of a base64 `data:` URL.
///
/// # Errors
///
/// Returns [`ImageSourceError::MalformedDataUrl`] for anything but
/// `data:<mime>;base64,<payload>`.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ImageSourceError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(ImageSourceError::MalformedDataUrl)?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(ImageSourceError::MalformedDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(ImageSourceError::MalformedDataUrl);
    }
    BASE64
        .decode(payload.trim())
        .map_err(|_| ImageSourceError::MalformedDataUrl)
}

/// Builds a base64 `data:` URL.
#[must_use]
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("failed to encode png");
        bytes
    }

    #[test]
    fn acquires_png_from_disk() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("photo.png");
        fs::write(&path, png_bytes(6, 4)).expect("failed to write png");

        let mut source = DecodedImageSource::new();
        let image = source.acquire(&PortableImage::Path(path.clone())).unwrap();
        let dims = source.dimensions(image).unwrap();
        assert_eq!((dims.width, dims.height), (6, 4));
        assert_eq!(source.export(image), Some(PortableImage::Path(path)));

        source.release(image);
        assert_eq!(source.live_count(), 0);
        assert!(source.dimensions(image).is_none());
    }

    #[test]
    fn acquires_data_url() {
        let url = encode_data_url("image/png", &png_bytes(3, 3));
        let mut source = DecodedImageSource::new();
        let image = source.acquire(&PortableImage::DataUrl(url)).unwrap();
        assert_eq!(source.dimensions(image).map(|d| d.width), Some(3));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut source = DecodedImageSource::new();
        let err = source
            .acquire(&PortableImage::Path(dir.path().join("nope.png")))
            .unwrap_err();
        assert!(matches!(err, ImageSourceError::NotFound(_)));
    }

    #[test]
    fn garbage_bytes_are_unsupported() {
        let url = encode_data_url("image/png", b"definitely not an image");
        let mut source = DecodedImageSource::new();
        assert_eq!(
            source.acquire(&PortableImage::DataUrl(url)),
            Err(ImageSourceError::UnsupportedFormat)
        );
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        for url in ["image/png;base64,AAAA", "data:image/png,AAAA", "data:image/png;base64"] {
            assert_eq!(decode_data_url(url), Err(ImageSourceError::MalformedDataUrl));
        }
        assert_eq!(decode_data_url("data:image/png;base64,!!!"), Err(ImageSourceError::MalformedDataUrl));
    }

    #[test]
    fn inline_embeds_file_as_data_url() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("photo.png");
        let bytes = png_bytes(2, 2);
        fs::write(&path, &bytes).expect("failed to write png");
        let PortableImage::DataUrl(url) = DecodedImageSource::inline(&path).unwrap() else {
            panic!("expected a data url");
        };
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), bytes);
    }
}
