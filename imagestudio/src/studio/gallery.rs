//! Gallery entries and their presentation helpers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// One generated image, held as raw bytes with its declared content type.
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GalleryImage {
    /// Render the image as a `data:` URL for embedding.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// The suggested file name for saving a gallery image. Always `.png`,
/// independent of the image's actual content type.
#[must_use]
pub fn download_filename(timestamp_millis: i64) -> String {
    format!("generated-image-{timestamp_millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_embeds_mime_and_base64() {
        let image = GalleryImage {
            bytes: vec![1, 2, 3],
            mime_type: "image/webp".into(),
        };
        assert_eq!(image.data_url(), "data:image/webp;base64,AQID");
    }

    #[test]
    fn download_filename_is_always_png() {
        assert_eq!(download_filename(1700000000000), "generated-image-1700000000000.png");
    }
}
