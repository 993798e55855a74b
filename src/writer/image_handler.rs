//! Image handling for PDF generation.
//!
//! Images are embedded as Image XObjects (PDF spec Section 8.9). PNG input is
//! decoded with the `image` crate; samples are Flate-compressed and any alpha
//! channel becomes a separate `/SMask` image.

use std::collections::HashMap;
use std::io::Write;

use crate::object::Object;

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

/// Decoded raster ready for embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per component (always 8 after decoding)
    pub bits_per_component: u8,
    /// Color space
    pub color_space: ColorSpace,
    /// Flate-compressed samples
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel, if the source had one
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageData {
    /// Decode a PNG image from raw PNG bytes.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        use image::GenericImageView;

        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidData(format!("empty image {}x{}", width, height)));
        }

        let (color_space, pixels, alpha) = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let mut gray = Vec::with_capacity((width * height) as usize);
                let mut alpha_channel = Vec::with_capacity((width * height) as usize);
                for pixel in la.pixels() {
                    gray.push(pixel.0[0]);
                    alpha_channel.push(pixel.0[1]);
                }
                (ColorSpace::DeviceGray, gray, Some(alpha_channel))
            },
            image::ColorType::Rgb8 | image::ColorType::Rgb16 => {
                (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None)
            },
            _ => {
                let rgba = img.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                let mut alpha_channel = Vec::with_capacity((width * height) as usize);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha_channel.push(pixel.0[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(alpha_channel))
            },
        };

        // A fully opaque alpha channel carries no information
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != 255));

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            data: compress_image_data(&pixels)?,
            soft_mask: alpha.map(|a| compress_image_data(&a)).transpose()?,
        })
    }

    /// Build the PDF Image XObject dictionary (without `/SMask`).
    pub fn build_xobject_dict(&self) -> HashMap<String, Object> {
        let mut dict = HashMap::new();

        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert(
            "ColorSpace".to_string(),
            Object::Name(self.color_space.pdf_name().to_string()),
        );
        dict.insert(
            "BitsPerComponent".to_string(),
            Object::Integer(self.bits_per_component as i64),
        );
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        dict.insert("Length".to_string(), Object::Integer(self.data.len() as i64));

        dict
    }

    /// Build a soft mask (alpha channel) XObject dictionary.
    pub fn build_soft_mask_dict(&self) -> Option<HashMap<String, Object>> {
        self.soft_mask.as_ref().map(|mask_data| {
            let mut dict = HashMap::new();
            dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
            dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
            dict.insert("Width".to_string(), Object::Integer(self.width as i64));
            dict.insert("Height".to_string(), Object::Integer(self.height as i64));
            dict.insert("ColorSpace".to_string(), Object::Name("DeviceGray".to_string()));
            dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
            dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            dict.insert("Length".to_string(), Object::Integer(mask_data.len() as i64));
            dict
        })
    }

    /// Display size inside a `max_width` × `max_height` box.
    ///
    /// Aspect ratio is preserved and the image is never enlarged:
    /// `scale = min(max_width / width, max_height / height, 1)`.
    pub fn fit_within(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let scale = (max_width / self.width as f32)
            .min(max_height / self.height as f32)
            .min(1.0);
        (self.width as f32 * scale, self.height as f32 * scale)
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Payload is not a `data:image/png;base64,` URL
    #[error("Unsupported image data URL: {0}")]
    UnsupportedDataUrl(String),

    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to compress image data
    #[error("Compression error: {0}")]
    CompressionError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}

fn compress_image_data(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ImageError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| ImageError::CompressionError(e.to_string()))
}

/// Image placement on a PDF page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Display width
    pub width: f32,
    /// Display height
    pub height: f32,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> ImageData {
        ImageData {
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceRGB,
            data: vec![],
            soft_mask: None,
        }
    }

    fn encode_png(img: image::DynamicImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_color_space() {
        assert_eq!(ColorSpace::DeviceGray.pdf_name(), "DeviceGray");
        assert_eq!(ColorSpace::DeviceRGB.pdf_name(), "DeviceRGB");
    }

    #[test]
    fn test_fit_within_downscales_wide_image() {
        let (w, h) = image(400, 100).fit_within(120.0, 50.0);
        assert!((w - 120.0).abs() < 0.001);
        assert!((h - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_within_downscales_tall_image() {
        let (w, h) = image(100, 200).fit_within(120.0, 50.0);
        assert!((w - 25.0).abs() < 0.001);
        assert!((h - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let (w, h) = image(60, 20).fit_within(120.0, 50.0);
        assert_eq!((w, h), (60.0, 20.0));
    }

    #[test]
    fn test_from_png_rgba_has_soft_mask() {
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        let png = encode_png(image::DynamicImage::ImageRgba8(img));

        let data = ImageData::from_png(&png).unwrap();
        assert_eq!((data.width, data.height), (4, 2));
        assert_eq!(data.color_space, ColorSpace::DeviceRGB);
        assert!(data.soft_mask.is_some());
        assert!(data.build_soft_mask_dict().is_some());
    }

    #[test]
    fn test_from_png_opaque_drops_mask() {
        let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 255]));
        let png = encode_png(image::DynamicImage::ImageRgba8(img));

        let data = ImageData::from_png(&png).unwrap();
        assert!(data.soft_mask.is_none());
    }

    #[test]
    fn test_from_png_gray() {
        let img = image::GrayImage::from_pixel(5, 5, image::Luma([128]));
        let png = encode_png(image::DynamicImage::ImageLuma8(img));

        let data = ImageData::from_png(&png).unwrap();
        assert_eq!(data.color_space, ColorSpace::DeviceGray);
        let dict = data.build_xobject_dict();
        assert_eq!(dict.get("ColorSpace"), Some(&Object::Name("DeviceGray".to_string())));
        assert_eq!(dict.get("Filter"), Some(&Object::Name("FlateDecode".to_string())));
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        let result = ImageData::from_png(b"\x89PNG\r\n\x1a\nnot really");
        assert!(matches!(result, Err(ImageError::DecodeError(_))));
    }
}
