//! Photo and tile decoding, resizing and encoding.
//!
//! Decoded images become premultiplied [`Bitmap`]s; encoders receive straight alpha (or straight
//! RGB for JPEG, which has no alpha channel).

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder as _, ImageFormat, ImageReader, RgbaImage};

use crate::foundation::core::Bitmap;
use crate::foundation::error::{StampError, StampResult};

/// A decoded photo and the container format it came from.
#[derive(Clone, Debug)]
pub struct DecodedPhoto {
    pub bitmap: Bitmap,
    pub format: ImageFormat,
}

/// Decode an in-memory image (map tiles, pin bitmaps).
pub fn decode(bytes: &[u8]) -> StampResult<Bitmap> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StampError::codec(format!("decode image: {e}")))?;
    dynamic_to_bitmap(img)
}

/// Open a photo and upright it.
///
/// `orientation` (EXIF 1..=8) overrides whatever the container reports; without it the decoder's
/// own orientation tag is honored.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn open_oriented(path: &Path, orientation: Option<u8>) -> StampResult<DecodedPhoto> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| StampError::codec(format!("open '{}': {e}", path.display())))?;
    let format = reader
        .format()
        .ok_or_else(|| StampError::codec(format!("unknown image format '{}'", path.display())))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| StampError::codec(format!("decode '{}': {e}", path.display())))?;
    let orientation = match orientation {
        Some(tag) => Orientation::from_exif(tag),
        None => decoder.orientation().ok(),
    };
    let mut img = DynamicImage::from_decoder(decoder)
        .map_err(|e| StampError::codec(format!("decode '{}': {e}", path.display())))?;
    if let Some(o) = orientation {
        img.apply_orientation(o);
    }

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?format,
        ?orientation,
        "decoded photo"
    );
    Ok(DecodedPhoto {
        bitmap: dynamic_to_bitmap(img)?,
        format,
    })
}

fn dynamic_to_bitmap(img: DynamicImage) -> StampResult<Bitmap> {
    let rgba = img.into_rgba8();
    let (w, h) = rgba.dimensions();
    Bitmap::from_straight_rgba8(w, h, rgba.into_raw())
}

/// Resample to exactly `width`×`height`. Filtering runs on premultiplied data so transparent
/// pixels do not bleed color.
pub fn resize(bitmap: &Bitmap, width: u32, height: u32) -> StampResult<Bitmap> {
    if bitmap.width() == width && bitmap.height() == height {
        return Ok(bitmap.clone());
    }
    let src = RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.data().to_vec())
        .ok_or_else(|| StampError::codec("bitmap buffer does not match its size"))?;
    let out = image::imageops::resize(&src, width, height, FilterType::Triangle);
    Bitmap::from_premul_rgba8(width, height, out.into_raw())
}

/// Output format for `path`, falling back to `source` when the extension is not recognized.
pub fn output_format(path: &Path, source: ImageFormat) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(source)
}

/// Encode `bitmap` as `format`. JPEG output is flattened to RGB at `jpeg_quality`.
pub fn encode(bitmap: &Bitmap, format: ImageFormat, jpeg_quality: u8) -> StampResult<Vec<u8>> {
    let rgba = RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.to_straight_rgba8())
        .ok_or_else(|| StampError::codec("bitmap buffer does not match its size"))?;
    let img = DynamicImage::ImageRgba8(rgba);

    let mut buf = Vec::new();
    let res = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100));
            DynamicImage::ImageRgb8(img.into_rgb8()).write_with_encoder(encoder)
        }
        other => img.write_to(&mut Cursor::new(&mut buf), other),
    };
    res.map_err(|e| StampError::codec(format!("encode {format:?}: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../tests/unit/codec/codec.rs"]
mod tests;
