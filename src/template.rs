//! Cheque template images.
//!
//! The template is kept at its natural pixel size. Vertical cheques are
//! rotated 90° clockwise before display, and the rotated bounding box is
//! the coordinate space for every overlay field. Print rasterizes the same
//! rotated pixels, so preview and paper share one frame.

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::error::ChequebookError;
use crate::layout::Orientation;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// A decoded cheque template.
#[derive(Debug, Clone)]
pub struct TemplateImage {
    image: DynamicImage,
}

impl TemplateImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Decode PNG, JPEG or any other format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<Self, ChequebookError> {
        image::load_from_memory(bytes)
            .map(Self::new)
            .map_err(|e| ChequebookError::Template(format!("Failed to decode template: {}", e)))
    }

    /// Load a template from a local path or an `http(s)` URL.
    pub async fn load(location: &str) -> Result<Self, ChequebookError> {
        let bytes = if location.starts_with("http://") || location.starts_with("https://") {
            download(location).await?
        } else {
            tokio::fs::read(location).await.map_err(|e| {
                ChequebookError::Template(format!("Failed to read {}: {}", location, e))
            })?
        };
        tracing::debug!(location, bytes = bytes.len(), "loaded cheque template");
        Self::decode(&bytes)
    }

    /// Unscaled pixel size of the source image.
    pub fn natural_size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    /// Natural size after orientation is applied.
    pub fn oriented_size(&self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Horizontal => self.natural_size(),
            Orientation::Vertical => self.natural_size().transposed(),
        }
    }

    /// Pixels as displayed for the orientation.
    pub fn oriented(&self, orientation: Orientation) -> DynamicImage {
        match orientation {
            Orientation::Horizontal => self.image.clone(),
            Orientation::Vertical => self.image.rotate90(),
        }
    }

    /// Encode the oriented pixels as PNG.
    pub fn to_png(&self, orientation: Orientation) -> Result<Vec<u8>, ChequebookError> {
        let mut png = Vec::new();
        self.oriented(orientation)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ChequebookError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(png)
    }
}

async fn download(url: &str) -> Result<Vec<u8>, ChequebookError> {
    let client = reqwest::Client::builder()
        .user_agent("chequebook/0.1")
        .build()
        .map_err(|e| ChequebookError::Transport(format!("HTTP client error: {}", e)))?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ChequebookError::Template(format!("Failed to download {}: {}", url, e)))?;
    if !response.status().is_success() {
        return Err(ChequebookError::Template(format!(
            "Failed to download {}: HTTP {}",
            url,
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ChequebookError::Template(format!("Failed to read template data: {}", e)))?;
    Ok(bytes.to_vec())
}

/// The template as it currently appears on screen: its pixels, the
/// orientation it is shown in, and the size of its rendered box.
#[derive(Debug, Clone, Copy)]
pub struct RenderedTemplate<'a> {
    pub image: &'a TemplateImage,
    pub orientation: Orientation,
    /// On-screen size. Defaults to the oriented natural size.
    pub display: Size,
}

impl<'a> RenderedTemplate<'a> {
    pub fn new(image: &'a TemplateImage, orientation: Orientation) -> Self {
        Self {
            image,
            orientation,
            display: image.oriented_size(orientation),
        }
    }

    /// Use a measured on-screen size instead of the natural one.
    pub fn with_display(mut self, display: Size) -> Self {
        self.display = display;
        self
    }
}
