//! Weighted fixation accumulation into a scalar density field.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};
use crate::kernel::GaussianKernel;

/// One gaze fixation in canvas pixel space (origin top-left, y down).
///
/// Weight scales the contribution of the fixation; callers that do not
/// model dwell duration or repeat count pass 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl WeightedPoint {
    pub fn new(x: i32, y: i32, weight: f32) -> Self {
        Self { x, y, weight }
    }
}

/// Output raster dimensions in pixels, independent of any background's
/// native resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject degenerate canvases before any allocation happens.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeatmapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Aggregated attention density, row-major `height x width`.
///
/// Mutable only while [`accumulate`] builds it; read-only afterwards.
/// Contributions are additive with no clamping, so cells have no fixed
/// upper bound.
#[derive(Debug, Clone)]
pub struct DensityField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DensityField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    /// Mean of the strictly positive cells, `None` when no cell is positive.
    pub fn positive_mean(&self) -> Option<f32> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in &self.values {
            if v > 0.0 {
                sum += v as f64;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some((sum / count as f64) as f32)
        }
    }

    /// Total mass of the field.
    pub fn total(&self) -> f64 {
        self.values.iter().map(|&v| v as f64).sum()
    }
}

/// Scatter one weighted kernel copy per in-bounds fixation, then crop the
/// padding back off.
///
/// Fixations on or outside the canvas boundary (`x <= 0`, `x >= width`,
/// `y <= 0`, `y >= height`) are dropped silently. For the rest, the kernel
/// window is anchored at the raw `(y, x)` coordinate inside the padded
/// frame rather than being shifted by the pad; since the pad equals half
/// the kernel side, the crop below lands the splat centered on the
/// fixation. Windows reaching past the buffer's high edge truncate
/// instead of erroring, which reproduces the reference falloff near the
/// far canvas edges.
pub fn accumulate(
    points: &[WeightedPoint],
    canvas: CanvasSize,
    kernel: &GaussianKernel,
) -> DensityField {
    let width = canvas.width as usize;
    let height = canvas.height as usize;
    let size = kernel.size();
    let pad = size / 2;
    let padded_w = width + 2 * pad;
    let padded_h = height + 2 * pad;

    let mut padded = vec![0.0f32; padded_w * padded_h];

    for p in points {
        if p.x <= 0 || p.y <= 0 {
            continue;
        }
        let x = p.x as usize;
        let y = p.y as usize;
        if x >= width || y >= height {
            continue;
        }

        let rows = size.min(padded_h - y);
        let cols = size.min(padded_w - x);
        for ky in 0..rows {
            let offset = (y + ky) * padded_w + x;
            let dst = &mut padded[offset..offset + cols];
            let src = &kernel.row(ky)[..cols];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s * p.weight;
            }
        }
    }

    let mut values = Vec::with_capacity(width * height);
    for row in 0..height {
        let start = (row + pad) * padded_w + pad;
        values.extend_from_slice(&padded[start..start + width]);
    }

    DensityField {
        width,
        height,
        values,
    }
}
