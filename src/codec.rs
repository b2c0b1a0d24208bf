//! # Image Codec Module
//!
//! Questo modulo incapsula decode, resample e re-encode delle immagini
//! usando il crate `image` in-process.
//!
//! ## Responsabilità:
//! - Lettura dimensioni senza decode completo (`image::image_dimensions`)
//! - Resample di alta qualità con filtro Lanczos3
//! - Re-encode con parametri espliciti per formato (niente kwargs dinamici):
//!   JPEG con qualità 1-100, PNG con livello di compressione massimo
//! - Riscrittura in-place sicura: encode su file temporaneo nella stessa
//!   directory, poi sostituzione dell'originale
//!
//! ## Conversioni di modo:
//! Le sorgenti con canale alpha salvate come JPEG vengono appiattite su
//! sfondo bianco prima dell'encode. I PNG conservano il loro color type.

use crate::dimensions::Dimensions;
use crate::error::PrepError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageEncoder, Rgb, RgbImage};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Per-format encode parameters, selected by detected format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeParams {
    /// Lossy re-encode at the given quality (1-100)
    Jpeg { quality: u8 },
    /// Lossless re-encode at maximum compression
    Png { compression: PngCompression },
}

/// PNG compression effort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    Fast,
    Best,
}

impl PngCompression {
    fn to_image_type(self) -> CompressionType {
        match self {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

impl EncodeParams {
    /// Pick encode parameters from the file extension.
    ///
    /// `quality` only applies to lossy formats; PNG always gets maximum
    /// lossless compression.
    pub fn for_path(path: &Path, quality: u8) -> Result<Self, PrepError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(EncodeParams::Jpeg { quality }),
            "png" => Ok(EncodeParams::Png {
                compression: PngCompression::Best,
            }),
            other => Err(PrepError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read `(width, height)` from an image header without a full decode.
pub fn read_dimensions(path: &Path) -> Result<Dimensions, PrepError> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(Dimensions::new(width, height))
}

/// Resample an image to `target` with Lanczos3 and rewrite it in place.
pub fn resize_in_place(
    path: &Path,
    target: Dimensions,
    params: EncodeParams,
) -> Result<(), PrepError> {
    let img = image::open(path)?;
    let resized = img.resize_exact(target.width, target.height, FilterType::Lanczos3);
    write_in_place(path, &resized, params)
}

/// Re-encode an image at its current dimensions and rewrite it in place.
pub fn reencode_in_place(path: &Path, params: EncodeParams) -> Result<(), PrepError> {
    let img = image::open(path)?;
    write_in_place(path, &img, params)
}

/// Encode into a temp file in the same directory, then replace the original.
/// An interrupted encode never leaves a half-written image behind.
fn write_in_place(path: &Path, img: &DynamicImage, params: EncodeParams) -> Result<(), PrepError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    encode(img, &mut temp, params)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| PrepError::Io(e.error))?;
    Ok(())
}

fn encode<W: Write>(
    img: &DynamicImage,
    writer: &mut W,
    params: EncodeParams,
) -> Result<(), PrepError> {
    match params {
        EncodeParams::Jpeg { quality } => {
            // JPEG has no alpha channel; flatten transparent sources first
            let rgb = if img.color().has_alpha() {
                flatten_onto_white(img)
            } else {
                img.to_rgb8()
            };
            let mut encoder = JpegEncoder::new_with_quality(writer, quality);
            encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
        }
        EncodeParams::Png { compression } => {
            let encoder =
                PngEncoder::new_with_quality(writer, compression.to_image_type(), PngFilter::Adaptive);
            encoder.write_image(img.as_bytes(), img.width(), img.height(), img.color())?;
        }
    }
    Ok(())
}

/// Composite an image with alpha onto a white background.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        let blend = |c: u8| (((c as u16 * alpha) + (255 * (255 - alpha))) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save(path).unwrap();
    }

    fn write_test_rgba_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 64])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_params_for_path() {
        assert_eq!(
            EncodeParams::for_path(Path::new("a.jpg"), 85).unwrap(),
            EncodeParams::Jpeg { quality: 85 }
        );
        assert_eq!(
            EncodeParams::for_path(Path::new("a.JPEG"), 70).unwrap(),
            EncodeParams::Jpeg { quality: 70 }
        );
        assert_eq!(
            EncodeParams::for_path(Path::new("a.png"), 85).unwrap(),
            EncodeParams::Png {
                compression: PngCompression::Best
            }
        );
        assert!(EncodeParams::for_path(Path::new("a.gif"), 85).is_err());
    }

    #[test]
    fn test_read_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("img.png");
        write_test_png(&path, 320, 200);

        let dims = read_dimensions(&path).unwrap();
        assert_eq!(dims, Dimensions::new(320, 200));
    }

    #[test]
    fn test_read_dimensions_missing_file() {
        assert!(read_dimensions(Path::new("/nonexistent/img.png")).is_err());
    }

    #[test]
    fn test_resize_in_place_changes_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("img.png");
        write_test_png(&path, 320, 200);

        let params = EncodeParams::for_path(&path, 85).unwrap();
        resize_in_place(&path, Dimensions::new(160, 100), params).unwrap();

        assert_eq!(read_dimensions(&path).unwrap(), Dimensions::new(160, 100));
    }

    #[test]
    fn test_reencode_in_place_keeps_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("img.png");
        write_test_png(&path, 64, 48);

        let params = EncodeParams::for_path(&path, 85).unwrap();
        reencode_in_place(&path, params).unwrap();

        assert_eq!(read_dimensions(&path).unwrap(), Dimensions::new(64, 48));
    }

    #[test]
    fn test_rgba_source_encodes_as_jpeg() {
        let tmp = TempDir::new().unwrap();
        let png = tmp.path().join("img.png");
        write_test_rgba_png(&png, 32, 32);

        // Re-encode the RGBA image under a .jpg name
        let jpg = tmp.path().join("img.jpg");
        let img = image::open(&png).unwrap();
        let mut out = std::fs::File::create(&jpg).unwrap();
        encode(&img, &mut out, EncodeParams::Jpeg { quality: 85 }).unwrap();

        assert_eq!(read_dimensions(&jpg).unwrap(), Dimensions::new(32, 32));
    }

    #[test]
    fn test_flatten_fully_transparent_is_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0])));
        let flat = flatten_onto_white(&img);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255])));
        let flat = flatten_onto_white(&img);
        assert_eq!(flat.get_pixel(0, 0).0, [10, 20, 30]);
    }
}
