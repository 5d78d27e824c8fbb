//! PNG and base64 serialization of the composited raster.

use base64::engine::general_purpose;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};

use crate::error::{HeatmapError, HeatmapResult};

/// Terminal artifact of a render: lossless PNG bytes plus their
/// transport-safe textual form. Ownership passes to the storage
/// collaborator; nothing in this crate holds onto it.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub base64: String,
}

impl EncodedImage {
    /// Data-URL form for direct embedding in payloads.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }
}

/// Serialize the raster to RGBA PNG and its base64 transport encoding.
///
/// Deterministic for identical raster bytes; codec failures surface as
/// [`HeatmapError::EncodeFailure`].
pub fn encode(raster: &RgbaImage) -> HeatmapResult<EncodedImage> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ColorType::Rgba8,
        )
        .map_err(|e| HeatmapError::EncodeFailure(e.to_string()))?;

    let base64 = general_purpose::STANDARD.encode(&bytes);
    Ok(EncodedImage { bytes, base64 })
}

/// Decode caller-supplied background bytes into an RGBA raster.
pub fn decode_background(bytes: &[u8]) -> HeatmapResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| HeatmapError::DecodeFailure(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Decode a base64 raster, tolerating a data-URL prefix.
pub fn decode_base64_raster(encoded: &str) -> HeatmapResult<RgbaImage> {
    let payload = match encoded.split_once(',') {
        Some((_, rest)) => rest,
        None => encoded,
    };
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| HeatmapError::DecodeFailure(e.to_string()))?;
    decode_background(&bytes)
}
