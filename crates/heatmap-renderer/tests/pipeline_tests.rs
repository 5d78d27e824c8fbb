//! End-to-end pipeline tests: fixations through to decoded PNG output.

use heatmap_renderer::{
    render_heatmap, HeatmapOptions, HeatmapRenderer, Smoothing, WeightedPoint,
};
use image::RgbaImage;

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes)
        .expect("output must decode")
        .to_rgba8()
}

#[test]
fn single_fixation_produces_centered_cluster() {
    let points = [WeightedPoint::new(400, 300, 1.0)];
    let encoded = render_heatmap(&points, 800, 600, None).unwrap();
    let out = decode(&encoded.bytes);
    assert_eq!(out.dimensions(), (800, 600));

    // The fixation itself is colored, fully opaque, and not base black.
    let center = out.get_pixel(400, 300);
    assert_eq!(center.0[3], 255);
    assert_ne!(center.0[..3], [0, 0, 0]);

    // The visible disc scales with sigma = 200/6: cells well inside two
    // sigma of the center are colored.
    for (x, y) in [(430, 300), (400, 330), (370, 300), (400, 270)] {
        let px = out.get_pixel(x, y);
        assert_ne!(px.0[..3], [0, 0, 0], "expected color at ({x}, {y})");
    }

    // Beyond the masked falloff the base layer shows through untouched.
    for (x, y) in [(520, 300), (400, 430), (100, 100), (700, 500)] {
        let px = out.get_pixel(x, y);
        assert_eq!(px.0, [0, 0, 0, 255], "expected base at ({x}, {y})");
    }
}

#[test]
fn identical_inputs_yield_byte_identical_output() {
    let points = [
        WeightedPoint::new(120, 90, 1.0),
        WeightedPoint::new(200, 150, 2.0),
        WeightedPoint::new(121, 92, 0.5),
    ];
    let a = render_heatmap(&points, 400, 300, None).unwrap();
    let b = render_heatmap(&points, 400, 300, None).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.base64, b.base64);
}

#[test]
fn zero_points_over_background_returns_faded_background() {
    let mut bg = RgbaImage::new(100, 80);
    for (x, y, px) in bg.enumerate_pixels_mut() {
        *px = image::Rgba([(x * 2) as u8, (y * 3) as u8, 200, 255]);
    }
    let bg_png = heatmap_renderer::encode::encode(&bg).unwrap();

    // Round the background through a file, the way service callers hand
    // over uploaded bytes.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("background.png");
    std::fs::write(&path, &bg_png.bytes).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    let encoded = render_heatmap(&[], 100, 80, Some(&bytes)).unwrap();
    let out = decode(&encoded.bytes);
    assert_eq!(out.dimensions(), (100, 80));

    for (x, y, px) in out.enumerate_pixels() {
        let original = bg.get_pixel(x, y);
        assert_eq!(px.0[..3], original.0[..3], "color shifted at ({x}, {y})");
        assert_eq!(px.0[3], 204, "alpha at ({x}, {y})");
    }
}

#[test]
fn fixation_over_background_changes_center_only() {
    let bg = RgbaImage::from_pixel(200, 200, image::Rgba([0, 0, 255, 255]));
    let bg_png = heatmap_renderer::encode::encode(&bg).unwrap();

    let renderer = HeatmapRenderer::new(HeatmapOptions {
        kernel_size: 60,
        ..HeatmapOptions::default()
    })
    .unwrap();

    let points = [WeightedPoint::new(100, 100, 1.0)];
    let encoded = renderer
        .render(&points, 200, 200, Some(&bg_png.bytes))
        .unwrap();
    let out = decode(&encoded.bytes);

    let faded_bg = [0u8, 0, 255, 204];
    assert_ne!(out.get_pixel(100, 100).0, faded_bg);
    assert_eq!(out.get_pixel(5, 5).0, faded_bg);
    assert_eq!(out.get_pixel(195, 195).0, faded_bg);
}

#[test]
fn boundary_fixations_render_like_no_fixations() {
    let boundary = [
        WeightedPoint::new(0, 50, 1.0),
        WeightedPoint::new(160, 50, 1.0),
        WeightedPoint::new(80, 0, 1.0),
        WeightedPoint::new(80, 120, 1.0),
    ];
    let with = render_heatmap(&boundary, 160, 120, None).unwrap();
    let without = render_heatmap(&[], 160, 120, None).unwrap();
    assert_eq!(with.bytes, without.bytes);
}

#[test]
fn smoothing_strategies_differ_only_at_mask_edges() {
    let points = [WeightedPoint::new(60, 60, 1.0)];
    let base_options = HeatmapOptions {
        kernel_size: 40,
        ..HeatmapOptions::default()
    };

    let smoothed = HeatmapRenderer::new(base_options.clone()).unwrap();
    let hard = HeatmapRenderer::new(HeatmapOptions {
        smoothing: Smoothing::None,
        ..base_options
    })
    .unwrap();

    let a = decode(&smoothed.render(&points, 120, 120, None).unwrap().bytes);
    let b = decode(&hard.render(&points, 120, 120, None).unwrap().bytes);

    // Same hot center either way.
    assert_eq!(a.get_pixel(60, 60).0[3], 255);
    assert_ne!(a.get_pixel(60, 60).0[..3], [0, 0, 0]);
    assert_ne!(b.get_pixel(60, 60).0[..3], [0, 0, 0]);

    // Far corner untouched by both.
    assert_eq!(a.get_pixel(5, 5).0, [0, 0, 0, 255]);
    assert_eq!(b.get_pixel(5, 5).0, [0, 0, 0, 255]);
}

#[test]
fn negative_weights_never_panic_and_fall_back_to_base() {
    let points = [
        WeightedPoint::new(40, 40, -1.0),
        WeightedPoint::new(60, 60, 0.0),
    ];
    let encoded = render_heatmap(&points, 100, 100, None).unwrap();
    let out = decode(&encoded.bytes);
    for px in out.pixels() {
        assert_eq!(px.0, [0, 0, 0, 255]);
    }
}
