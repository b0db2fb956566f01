//! Tests for PNG encoding of figures.

use plot_common::{Bounds, Color, RenderConfig};
use renderer::figure::Figure;
use renderer::png::{create_png, create_png_auto, create_png_indexed, Palette};
use test_utils::{is_png, png_color_type, png_dimensions, TestOutputDir};

// ============================================================================
// Encoder tests
// ============================================================================

#[test]
fn test_auto_uses_palette_for_few_colors() {
    let rgba: Vec<u8> = (0..64)
        .flat_map(|i| {
            if i % 2 == 0 {
                [255, 0, 0, 255]
            } else {
                [0, 0, 255, 255]
            }
        })
        .collect();
    let png = create_png_auto(&rgba, 8, 8).unwrap();
    assert!(is_png(&png));
    assert_eq!(png_dimensions(&png), Some((8, 8)));
    assert_eq!(png_color_type(&png), Some(3));
}

#[test]
fn test_auto_falls_back_to_rgba() {
    let rgba: Vec<u8> = (0..1024u32)
        .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
        .collect();
    let png = create_png_auto(&rgba, 32, 32).unwrap();
    assert_eq!(png_color_type(&png), Some(6));
}

#[test]
fn test_indexed_with_transparency_has_trns() {
    let palette = Palette {
        colors: vec![[0, 0, 0, 0], [255, 255, 255, 255]],
        indices: vec![0, 1, 1, 0],
    };
    let png = create_png_indexed(&palette, 2, 2).unwrap();
    assert!(png.windows(4).any(|w| w == b"tRNS"));
}

#[test]
fn test_dimension_mismatch_is_error() {
    assert!(create_png(&[0u8; 16], 3, 1).is_err());
    assert!(create_png_auto(&[0u8; 16], 1, 3).is_err());
}

// ============================================================================
// Figure output tests
// ============================================================================

#[test]
fn test_figure_png_matches_pixel_size() {
    let config = RenderConfig {
        dpi: 20.0,
        ..RenderConfig::default()
    };
    let mut fig = Figure::new(2.0, 1.5, &config).unwrap();
    fig.set_view(Bounds::new(-1.0, -1.0, 1.0, 1.0), 0.0).unwrap();
    fig.fill_polygon(&[(-0.5, -0.5), (0.5, -0.5), (0.0, 0.5)], Color::BLACK)
        .unwrap();

    let png = fig.encode_png().unwrap();
    assert_eq!(png_dimensions(&png), Some((40, 30)));
}

#[test]
fn test_save_png_writes_file() {
    let out = TestOutputDir::new();
    let fig = Figure::with_pixels(16, 16, &RenderConfig::default()).unwrap();
    let path = out.file("blank.png");
    fig.save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(is_png(&bytes));
    assert_eq!(png_dimensions(&bytes), Some((16, 16)));
}

#[test]
fn test_save_png_to_missing_dir_fails() {
    let out = TestOutputDir::new();
    let fig = Figure::with_pixels(4, 4, &RenderConfig::default()).unwrap();
    let err = fig.save_png(out.file("missing/dir/out.png")).unwrap_err();
    assert!(matches!(err, plot_common::PlotError::EncodeError(_)));
}
