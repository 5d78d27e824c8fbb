//! Gaze attention heatmap rendering.
//!
//! Turns a sequence of weighted gaze fixations into one composited
//! raster, as a straight-line pipeline:
//!
//! - Gaussian splat template, generated once per configuration
//! - weighted density accumulation over the canvas
//! - threshold, color scale and smoothing, composited over an optional
//!   background at fixed layer opacities
//! - lossless PNG output plus its base64 transport form
//!
//! The pipeline is synchronous and stateless per request; only the splat
//! template and the expanded palettes live for the process lifetime, and
//! both are read-only after construction.

pub mod colorscale;
pub mod composite;
pub mod density;
pub mod encode;
pub mod error;
pub mod kernel;
pub mod options;
pub mod renderer;
pub mod smoothing;

pub use colorscale::ColorScale;
pub use density::{CanvasSize, DensityField, WeightedPoint};
pub use encode::EncodedImage;
pub use error::{HeatmapError, HeatmapResult};
pub use kernel::GaussianKernel;
pub use options::HeatmapOptions;
pub use renderer::{render_heatmap, HeatmapRenderer};
pub use smoothing::Smoothing;
