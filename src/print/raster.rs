//! Template rasterization for the print document.
//!
//! The template is encoded at its natural (unscaled) size, independent of
//! how large it is shown on screen.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::template::{RenderedTemplate, Size};

/// Canvas size used when no template is available.
pub const FALLBACK_SIZE: Size = Size::new(800, 400);

/// Data URI for a blank image.
pub const EMPTY_DATA_URI: &str = "data:,";

/// A template encoded as an embeddable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rasterized {
    /// `data:image/png;base64,...`, or [`EMPTY_DATA_URI`].
    pub data_uri: String,
    /// Pixel size of the encoded image.
    pub size: Size,
}

impl Rasterized {
    pub fn blank() -> Self {
        Self {
            data_uri: EMPTY_DATA_URI.to_string(),
            size: FALLBACK_SIZE,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.data_uri == EMPTY_DATA_URI
    }
}

/// Encode the on-screen template as a PNG data URI.
///
/// A missing template or an encoding failure yields a blank 800×400 result;
/// printing continues with an empty background.
pub fn rasterize(template: Option<&RenderedTemplate<'_>>) -> Rasterized {
    let Some(template) = template else {
        tracing::warn!("no template image at print time, printing on a blank background");
        return Rasterized::blank();
    };

    match template.image.to_png(template.orientation) {
        Ok(png) => Rasterized {
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(png)),
            size: template.image.oriented_size(template.orientation),
        },
        Err(e) => {
            tracing::warn!(
                error = %e,
                "template rasterization failed, printing on a blank background"
            );
            Rasterized::blank()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;
    use crate::template::TemplateImage;
    use image::{DynamicImage, GrayImage, Luma};

    #[test]
    fn test_missing_template_falls_back() {
        let raster = rasterize(None);
        assert!(raster.is_blank());
        assert_eq!(raster.size, Size::new(800, 400));
    }

    #[test]
    fn test_uses_natural_size_not_display() {
        let image = TemplateImage::new(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            120,
            50,
            Luma([255]),
        )));
        let rendered =
            RenderedTemplate::new(&image, Orientation::Horizontal).with_display(Size::new(60, 25));
        let raster = rasterize(Some(&rendered));
        assert!(raster.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(raster.size, Size::new(120, 50));

        let encoded = raster.data_uri.trim_start_matches("data:image/png;base64,");
        let png = STANDARD.decode(encoded).unwrap();
        let decoded = TemplateImage::decode(&png).unwrap();
        assert_eq!(decoded.natural_size(), Size::new(120, 50));
    }
}
