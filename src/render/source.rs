//! Decoded source image.

use std::io::Cursor;
use std::path::Path;

use image::error::{LimitError, LimitErrorKind};
use image::{DynamicImage, ImageDecoder, ImageError, ImageReader, RgbaImage};

use crate::dimension::Size;
use crate::render::{RenderError, ResizeConfig};

/// A decoded, upright RGBA raster.
///
/// Immutable once built. The aspect ratio travels with the pixels, so a
/// resolve can never observe an aspect from a different image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pixels: RgbaImage,
}

impl ImageSource {
    /// Wrap already-decoded pixels. Returns `None` for an empty image.
    pub fn from_image(image: DynamicImage) -> Option<Self> {
        let pixels = image.into_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return None;
        }
        Some(Self { pixels })
    }

    /// Decode PNG, JPEG or WebP bytes.
    ///
    /// The format is sniffed from the content. Header dimensions are checked
    /// against [`ResizeConfig::max_decoded_pixels`] before the full decode,
    /// and EXIF orientation is applied so the result is upright.
    pub fn decode(bytes: &[u8], config: &ResizeConfig) -> Result<Self, RenderError> {
        let (width, height) = reader(bytes)?
            .into_dimensions()
            .map_err(RenderError::Decode)?;
        let pixels = width as u64 * height as u64;
        if pixels > config.max_decoded_pixels {
            return Err(RenderError::TooLarge {
                width,
                height,
                limit: config.max_decoded_pixels,
            });
        }

        let mut decoder = reader(bytes)?
            .into_decoder()
            .map_err(RenderError::Decode)?;
        let orientation = decoder.orientation().map_err(RenderError::Decode)?;
        let mut image = DynamicImage::from_decoder(decoder).map_err(RenderError::Decode)?;
        image.apply_orientation(orientation);

        let source = Self::from_image(image).ok_or_else(|| {
            RenderError::Decode(ImageError::Limits(LimitError::from_kind(
                LimitErrorKind::DimensionError,
            )))
        })?;

        log::info!(
            "decoded {} bytes: {}x{} ({:?})",
            bytes.len(),
            source.width(),
            source.height(),
            orientation
        );
        Ok(source)
    }

    /// Read a file and [`decode`](Self::decode) it.
    pub fn open(path: impl AsRef<Path>, config: &ResizeConfig) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes, config)
    }

    /// Width in pixels, after orientation.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels, after orientation.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Both dimensions. Never empty.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Width divided by height. Always finite and positive.
    pub fn aspect(&self) -> f64 {
        self.size().aspect()
    }

    /// The upright RGBA raster.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, RenderError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RenderError::Decode(ImageError::IoError(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let src = ImageSource::decode(&png_bytes(40, 20), &ResizeConfig::default()).unwrap();
        assert_eq!(src.size(), Size::new(40, 20));
        assert_eq!(src.aspect(), 2.0);
        assert_eq!(src.pixels().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    fn crc32(bytes: &[u8]) -> u32 {
        let mut crc = !0u32;
        for &b in bytes {
            crc ^= b as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
        }
        !crc
    }

    /// Insert an `eXIf` chunk carrying `orientation` ahead of the first IDAT.
    fn with_orientation(png: &[u8], orientation: u16) -> Vec<u8> {
        // Big-endian TIFF header, one IFD entry: 0x0112 SHORT x1.
        let mut exif = vec![b'M', b'M', 0, 42, 0, 0, 0, 8, 0, 1, 0x01, 0x12, 0, 3, 0, 0, 0, 1];
        exif.extend_from_slice(&orientation.to_be_bytes());
        exif.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

        let mut body = b"eXIf".to_vec();
        body.extend_from_slice(&exif);
        let mut chunk = (exif.len() as u32).to_be_bytes().to_vec();
        chunk.extend_from_slice(&body);
        chunk.extend_from_slice(&crc32(&body).to_be_bytes());

        let idat = png.windows(4).position(|w| w == b"IDAT").unwrap() - 4;
        let mut out = png[..idat].to_vec();
        out.extend_from_slice(&chunk);
        out.extend_from_slice(&png[idat..]);
        out
    }

    #[test]
    fn applies_exif_orientation() {
        const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
        const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
        const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
        // Stored 4×2: left half red with a green top-left corner, right half blue.
        let stored = RgbaImage::from_fn(4, 2, |x, y| match (x, y) {
            (0, 0) => GREEN,
            (x, _) if x < 2 => RED,
            _ => BLUE,
        });
        let mut out = Cursor::new(Vec::new());
        stored.write_to(&mut out, ImageFormat::Png).unwrap();

        // 6 = rotate 90° clockwise to display upright.
        let bytes = with_orientation(&out.into_inner(), 6);
        let src = ImageSource::decode(&bytes, &ResizeConfig::default()).unwrap();
        assert_eq!(src.size(), Size::new(2, 4));
        assert_eq!(src.aspect(), 0.5);
        assert_eq!(src.pixels().get_pixel(1, 0), &GREEN);
        assert_eq!(src.pixels().get_pixel(0, 0), &RED);
        assert_eq!(src.pixels().get_pixel(0, 1), &RED);
        assert_eq!(src.pixels().get_pixel(0, 2), &BLUE);
        assert_eq!(src.pixels().get_pixel(1, 3), &BLUE);
    }

    #[test]
    fn orientation_one_is_untouched() {
        let bytes = with_orientation(&png_bytes(4, 2), 1);
        let src = ImageSource::decode(&bytes, &ResizeConfig::default()).unwrap();
        assert_eq!(src.size(), Size::new(4, 2));
    }

    #[test]
    fn rejects_garbage() {
        let err = ImageSource::decode(b"definitely not an image", &ResizeConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)), "{err}");
    }

    #[test]
    fn rejects_truncated() {
        let bytes = png_bytes(64, 64);
        let err = ImageSource::decode(&bytes[..20], &ResizeConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)), "{err}");
    }

    #[test]
    fn enforces_pixel_limit_from_header() {
        let config = ResizeConfig::default().max_decoded_pixels(100);
        let err = ImageSource::decode(&png_bytes(20, 10), &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TooLarge {
                width: 20,
                height: 10,
                limit: 100
            }
        ));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let err = ImageSource::open("/nonexistent/for/sure.png", &ResizeConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn from_image_rejects_empty() {
        assert!(ImageSource::from_image(DynamicImage::new_rgba8(0, 5)).is_none());
    }
}
