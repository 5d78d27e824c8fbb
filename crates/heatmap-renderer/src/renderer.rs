//! Pipeline orchestration: fixations in, encoded raster out.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::colorscale::{ColorScale, Palette};
use crate::composite::{composite, CompositeParams};
use crate::density::{accumulate, CanvasSize, WeightedPoint};
use crate::encode::{decode_background, encode, EncodedImage};
use crate::error::{HeatmapError, HeatmapResult};
use crate::kernel::GaussianKernel;
use crate::options::HeatmapOptions;

/// Stateless heatmap pipeline with a process-lifetime splat template.
///
/// Construction resolves the configured color scale and precomputes the
/// Gaussian kernel; the value is immutable afterwards and can be shared
/// across worker threads without locking. Each [`render`](Self::render)
/// call is pure given its inputs and holds no cross-request state.
pub struct HeatmapRenderer {
    options: HeatmapOptions,
    kernel: GaussianKernel,
    palette: Palette,
}

/// Process-wide renderer with the default configuration, initialized
/// lazily on first use.
static DEFAULT_RENDERER: Lazy<HeatmapRenderer> = Lazy::new(|| {
    HeatmapRenderer::new(HeatmapOptions::default())
        .expect("default heatmap options resolve a known color scale")
});

impl HeatmapRenderer {
    pub fn new(options: HeatmapOptions) -> HeatmapResult<Self> {
        let scale = ColorScale::named(&options.color_scale)?;
        let palette = scale.palette();
        let kernel = GaussianKernel::generate(options.kernel_size, options.kernel_stddev());
        Ok(Self {
            options,
            kernel,
            palette,
        })
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Render one attention map.
    ///
    /// `background`, when given, holds encoded raster bytes (PNG, JPEG,
    /// anything the decoder recognizes) whose pixel dimensions must
    /// already equal `width x height`; no resampling is performed here.
    pub fn render(
        &self,
        points: &[WeightedPoint],
        width: u32,
        height: u32,
        background: Option<&[u8]>,
    ) -> HeatmapResult<EncodedImage> {
        let canvas = CanvasSize::new(width, height);
        canvas.validate()?;

        let background = background.map(decode_background).transpose()?;
        if let Some(bg) = &background {
            if bg.dimensions() != (width, height) {
                return Err(HeatmapError::BackgroundSizeMismatch {
                    expected_width: width,
                    expected_height: height,
                    actual_width: bg.width(),
                    actual_height: bg.height(),
                });
            }
        }

        debug!(
            points = points.len(),
            width,
            height,
            has_background = background.is_some(),
            "rendering heatmap"
        );

        let density = accumulate(points, canvas, &self.kernel);
        let raster = composite(
            &density,
            background.as_ref(),
            canvas,
            &CompositeParams {
                palette: &self.palette,
                alpha_background: self.options.alpha_background,
                alpha_heatmap: self.options.alpha_heatmap,
                mask_fraction: self.options.mask_fraction,
                smoothing: self.options.smoothing,
            },
        );
        encode(&raster)
    }
}

/// Render with the process-wide default configuration.
pub fn render_heatmap(
    points: &[WeightedPoint],
    width: u32,
    height: u32,
    background: Option<&[u8]>,
) -> HeatmapResult<EncodedImage> {
    DEFAULT_RENDERER.render(points, width, height, background)
}
