//! Layer compositing for the final heatmap raster.
//!
//! Two fixed layers over a transparent canvas: the background (or a
//! solid black base when none is given) at its configured opacity, then
//! the thresholded, colormapped, smoothed density field at its own
//! opacity. Blending happens in premultiplied f32 and is converted back
//! to straight RGBA at the end.

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use crate::colorscale::Palette;
use crate::density::{CanvasSize, DensityField};
use crate::smoothing::Smoothing;

/// Per-render compositing inputs resolved from the configuration.
pub struct CompositeParams<'a> {
    pub palette: &'a Palette,
    pub alpha_background: f32,
    pub alpha_heatmap: f32,
    pub mask_fraction: f32,
    pub smoothing: Smoothing,
}

/// Blend the base and heatmap layers into the output raster.
///
/// The background, when present, must already match `canvas`; the caller
/// validates that before decoding reaches this point. An all-zero (or
/// never-positive) density field short-circuits to the base layer alone.
pub fn composite(
    density: &DensityField,
    background: Option<&RgbaImage>,
    canvas: CanvasSize,
    params: &CompositeParams<'_>,
) -> RgbaImage {
    let width = canvas.width as usize;
    let height = canvas.height as usize;

    // Base layer, premultiplied f32 over a fully transparent canvas.
    let mut base = vec![0.0f32; width * height * 4];
    match background {
        Some(bg) => {
            let opacity = params.alpha_background.clamp(0.0, 1.0);
            for (dst, px) in base.chunks_exact_mut(4).zip(bg.pixels()) {
                let a = px[3] as f32 / 255.0 * opacity;
                dst[0] = px[0] as f32 / 255.0 * a;
                dst[1] = px[1] as f32 / 255.0 * a;
                dst[2] = px[2] as f32 / 255.0 * a;
                dst[3] = a;
            }
        }
        None => {
            // Solid opaque black.
            for dst in base.chunks_exact_mut(4) {
                dst[3] = 1.0;
            }
        }
    }

    if let Some(mean) = density.positive_mean() {
        let lowbound = mean * params.mask_fraction;
        debug!(lowbound, "compositing heatmap layer");

        let layer = heatmap_layer(density, lowbound, params.palette);
        let layer = params.smoothing.apply(layer, width, height);

        let opacity = params.alpha_heatmap.clamp(0.0, 1.0);
        for (dst, src) in base.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
            // Premultiplied source, so opacity scales every channel.
            let sr = src[0] as f32 / 255.0 * opacity;
            let sg = src[1] as f32 / 255.0 * opacity;
            let sb = src[2] as f32 / 255.0 * opacity;
            let sa = src[3] as f32 / 255.0 * opacity;
            let inv = 1.0 - sa;
            dst[0] = sr + dst[0] * inv;
            dst[1] = sg + dst[1] * inv;
            dst[2] = sb + dst[2] * inv;
            dst[3] = sa + dst[3] * inv;
        }
    }

    // Unpremultiply into the output raster.
    let mut out = RgbaImage::new(canvas.width, canvas.height);
    for (dst, src) in out.pixels_mut().zip(base.chunks_exact(4)) {
        let a = src[3];
        if a > 0.0 {
            dst[0] = (src[0] / a * 255.0).round().clamp(0.0, 255.0) as u8;
            dst[1] = (src[1] / a * 255.0).round().clamp(0.0, 255.0) as u8;
            dst[2] = (src[2] / a * 255.0).round().clamp(0.0, 255.0) as u8;
            dst[3] = (a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Rasterize the visible density cells through the palette into a
/// premultiplied RGBA layer; masked cells stay fully transparent.
///
/// Negative density never survives the mask (the cutoff derives from the
/// mean of the positive cells), but it is clamped to zero first anyway so
/// a zero `mask_fraction` cannot index the palette with a negative value.
fn heatmap_layer(density: &DensityField, lowbound: f32, palette: &Palette) -> Vec<u8> {
    let width = density.width();
    let values = density.values();

    // Normalize over the visible cells only.
    let mut min_v = f32::INFINITY;
    let mut max_v = f32::NEG_INFINITY;
    for &v in values {
        if v >= lowbound {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
    }
    let range = max_v - min_v;

    let mut pixels = vec![0u8; values.len() * 4];
    pixels
        .par_chunks_exact_mut(width * 4)
        .zip(values.par_chunks_exact(width))
        .for_each(|(row_px, row_vals)| {
            for (px, &v) in row_px.chunks_exact_mut(4).zip(row_vals) {
                let v = v.max(0.0);
                if v < lowbound {
                    continue;
                }
                let t = if range.abs() < f32::EPSILON {
                    0.5
                } else {
                    (v - min_v) / range
                };
                let [r, g, b] = palette.sample(t);
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = 255;
            }
        });
    pixels
}
