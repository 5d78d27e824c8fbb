//! Rendering configuration.

use serde::{Deserialize, Serialize};

use crate::smoothing::Smoothing;

/// Tunable constants for the rendering pipeline.
///
/// Defaults match the production service: a 200 px Gaussian template
/// with stddev fixed at a sixth of the side, 0.8 opacity on both layers,
/// the turbo scale, and a visibility cutoff at half the mean positive
/// density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    /// Side length of the Gaussian splat template, in pixels.
    pub kernel_size: usize,
    /// Opacity of the background layer.
    pub alpha_background: f32,
    /// Opacity of the heatmap layer.
    pub alpha_heatmap: f32,
    /// Name of the color scale ("turbo" or "jet").
    pub color_scale: String,
    /// Fraction of the mean positive density below which cells are hidden.
    pub mask_fraction: f32,
    /// Edge smoothing applied to the rasterized heatmap layer.
    pub smoothing: Smoothing,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            kernel_size: 200,
            alpha_background: 0.8,
            alpha_heatmap: 0.8,
            color_scale: "turbo".to_string(),
            mask_fraction: 0.5,
            smoothing: Smoothing::default(),
        }
    }
}

impl HeatmapOptions {
    /// Standard deviation of the splat template.
    pub fn kernel_stddev(&self) -> f32 {
        self.kernel_size as f32 / 6.0
    }
}
