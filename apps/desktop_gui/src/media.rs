//! Product image decoding for cell thumbnails.

/// Longest edge of a decoded product thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 256;

#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PreviewImage {
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied([self.width, self.height], &self.rgba)
    }
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_preview_image, THUMBNAIL_EDGE};
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_small_png_at_original_size() {
        let preview = decode_preview_image(&encode_png(4, 3)).expect("decode");
        assert_eq!((preview.width, preview.height), (4, 3));
        assert_eq!(preview.rgba.len(), 4 * 3 * 4);
    }

    #[test]
    fn large_images_are_shrunk_to_thumbnail_edge() {
        let preview = decode_preview_image(&encode_png(1024, 512)).expect("decode");
        assert_eq!(preview.width, THUMBNAIL_EDGE as usize);
        assert_eq!(preview.height, THUMBNAIL_EDGE as usize / 2);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_preview_image(b"definitely not an image").is_err());
    }
}
