//! Edge smoothing for the rasterized heatmap layer.
//!
//! The visibility mask produces hard cell boundaries; the gaussian
//! strategy softens them with a separable two-pass blur over the
//! premultiplied layer, so color never bleeds out of transparent cells
//! disproportionately to coverage.

use serde::{Deserialize, Serialize};

/// Smoothing strategy applied to the colormapped layer before it is
/// composited over the base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Smoothing {
    None,
    Gaussian { sigma: f32 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Gaussian { sigma: 1.0 }
    }
}

impl Smoothing {
    /// Apply the strategy to a premultiplied RGBA layer.
    pub fn apply(&self, pixels: Vec<u8>, width: usize, height: usize) -> Vec<u8> {
        match *self {
            Smoothing::None => pixels,
            Smoothing::Gaussian { sigma } => {
                if sigma <= 0.0 {
                    pixels
                } else {
                    blur_rgba_premultiplied(&pixels, width, height, sigma)
                }
            }
        }
    }
}

/// Separable gaussian blur over premultiplied RGBA pixels, clamping
/// samples to the layer edge.
pub fn blur_rgba_premultiplied(src: &[u8], width: usize, height: usize, sigma: f32) -> Vec<u8> {
    let radius = (sigma * 3.0).ceil() as i32;
    if radius == 0 || width == 0 || height == 0 {
        return src.to_vec();
    }
    let weights = gaussian_weights(radius, sigma);

    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];

    // Horizontal pass.
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, w) in weights.iter().enumerate() {
                let sx = (x as i32 + k as i32 - radius).clamp(0, width as i32 - 1) as usize;
                let idx = (y * width + sx) * 4;
                for c in 0..4 {
                    acc[c] += src[idx + c] as f32 * w;
                }
            }
            let idx = (y * width + x) * 4;
            for c in 0..4 {
                tmp[idx + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    // Vertical pass.
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (k, w) in weights.iter().enumerate() {
                let sy = (y as i32 + k as i32 - radius).clamp(0, height as i32 - 1) as usize;
                let idx = (sy * width + x) * 4;
                for c in 0..4 {
                    acc[c] += tmp[idx + c] as f32 * w;
                }
            }
            let idx = (y * width + x) * 4;
            for c in 0..4 {
                out[idx + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

fn gaussian_weights(radius: i32, sigma: f32) -> Vec<f32> {
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|i| {
            let x = i as f32;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}
