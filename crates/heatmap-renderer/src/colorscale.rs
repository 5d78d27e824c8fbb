//! Named color scales and precomputed palettes.
//!
//! A scale is a data-driven gradient (sorted stops over [0, 1]) rather
//! than a hard-coded plotting routine, so alternative scales can be
//! swapped without touching the accumulator or the encoder. Palettes are
//! expanded to a 256-entry LUT once per scale and cached process-wide.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::error::{HeatmapError, HeatmapResult};

/// A named gradient defined by color stops over the unit interval.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub name: &'static str,
    stops: &'static [(f32, [u8; 3])],
}

/// 256-entry RGB lookup table computed from a scale's stops.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<[u8; 3]>,
}

impl Palette {
    /// Color for a normalized intensity in [0, 1]; out-of-range input clamps.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let idx = (t.clamp(0.0, 1.0) * 255.0).round() as usize;
        self.entries[idx]
    }
}

/// High-contrast perceptually graded scale (default). Anchor colors
/// sampled from the published turbo lookup table.
static TURBO_STOPS: &[(f32, [u8; 3])] = &[
    (0.00, [48, 18, 59]),
    (0.07, [62, 62, 168]),
    (0.14, [66, 100, 222]),
    (0.21, [62, 137, 250]),
    (0.28, [38, 173, 228]),
    (0.35, [24, 205, 189]),
    (0.42, [34, 229, 148]),
    (0.49, [98, 245, 92]),
    (0.56, [161, 252, 60]),
    (0.63, [212, 241, 60]),
    (0.70, [246, 215, 70]),
    (0.77, [254, 178, 53]),
    (0.84, [242, 128, 34]),
    (0.91, [216, 77, 18]),
    (0.96, [178, 38, 6]),
    (1.00, [122, 4, 3]),
];

/// Classic rainbow scale, kept as the documented alternative.
static JET_STOPS: &[(f32, [u8; 3])] = &[
    (0.000, [0, 0, 128]),
    (0.125, [0, 0, 255]),
    (0.375, [0, 255, 255]),
    (0.625, [255, 255, 0]),
    (0.875, [255, 0, 0]),
    (1.000, [128, 0, 0]),
];

pub const TURBO: ColorScale = ColorScale {
    name: "turbo",
    stops: TURBO_STOPS,
};

pub const JET: ColorScale = ColorScale {
    name: "jet",
    stops: JET_STOPS,
};

/// Cache of expanded palettes, keyed by scale name. Computed once per
/// scale and reused for all subsequent renders.
static PALETTE_CACHE: Lazy<RwLock<HashMap<&'static str, Palette>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

impl ColorScale {
    /// Look up a scale by its configured name.
    pub fn named(name: &str) -> HeatmapResult<&'static ColorScale> {
        match name {
            "turbo" => Ok(&TURBO),
            "jet" => Ok(&JET),
            other => Err(HeatmapError::UnknownColorScale(other.to_string())),
        }
    }

    /// Get the cached 256-entry palette for this scale, computing it on
    /// first use.
    pub fn palette(&self) -> Palette {
        {
            let cache = PALETTE_CACHE.read().unwrap();
            if let Some(palette) = cache.get(self.name) {
                return palette.clone();
            }
        }

        let mut cache = PALETTE_CACHE.write().unwrap();
        // Double-check after acquiring the write lock.
        if let Some(palette) = cache.get(self.name) {
            return palette.clone();
        }

        let palette = compute_palette(self.stops);
        cache.insert(self.name, palette.clone());
        palette
    }
}

fn compute_palette(stops: &[(f32, [u8; 3])]) -> Palette {
    let entries = (0..256)
        .map(|i| sample_stops(stops, i as f32 / 255.0))
        .collect();
    Palette { entries }
}

/// Linear interpolation between the two stops surrounding `t`.
fn sample_stops(stops: &[(f32, [u8; 3])], t: f32) -> [u8; 3] {
    let (first, last) = (stops[0], stops[stops.len() - 1]);
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }

    let mut low = first;
    let mut high = last;
    for window in stops.windows(2) {
        if window[0].0 <= t && t <= window[1].0 {
            low = window[0];
            high = window[1];
            break;
        }
    }

    let span = high.0 - low.0;
    let frac = if span.abs() < f32::EPSILON {
        0.0
    } else {
        (t - low.0) / span
    };

    let mut rgb = [0u8; 3];
    for c in 0..3 {
        let a = low.1[c] as f32;
        let b = high.1[c] as f32;
        rgb[c] = (a + (b - a) * frac).round() as u8;
    }
    rgb
}
