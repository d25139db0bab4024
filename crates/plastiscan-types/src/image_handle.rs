//! Opaque handle to a captured or uploaded image

use crate::error::ScanError;
use image::ImageFormat;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Where an image came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Frame grabbed from a live camera stream
    Camera { frame: u64 },
    /// File chosen by the user
    File(PathBuf),
}

impl ImageSource {
    pub fn label(&self) -> String {
        match self {
            ImageSource::Camera { frame } => format!("camera frame #{}", frame),
            ImageSource::File(path) => path.display().to_string(),
        }
    }
}

/// Encoded image bytes plus the metadata needed to display them.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    id: Uuid,
    source: ImageSource,
    format: ImageFormat,
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl ImageHandle {
    /// Validate and wrap encoded image bytes.
    ///
    /// The content must be a format the `image` crate recognises and must
    /// decode cleanly; anything else is an `UnreadableFile`.
    pub fn from_encoded(bytes: Vec<u8>, source: ImageSource) -> Result<Self, ScanError> {
        let format = image::guess_format(&bytes).map_err(|e| {
            ScanError::UnreadableFile(format!("{}: {}", source.label(), e))
        })?;
        let decoded = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            ScanError::UnreadableFile(format!("{}: {}", source.label(), e))
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            source,
            format,
            width: decoded.width(),
            height: decoded.height(),
            bytes: bytes.into(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Path of the uploaded file, if this image came from one
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ImageSource::File(path) => Some(path),
            ImageSource::Camera { .. } => None,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex SHA-256 of the encoded bytes
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(&self.bytes);
        format!("{:x}", hash)
    }
}
