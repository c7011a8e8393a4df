use super::*;
use crate::foundation::core::{Vec2, Viewport};
use crate::render::draw::Painter;

fn backend() -> CpuBackend {
    CpuBackend::new(RenderSettings::default()).unwrap()
}

#[test]
fn background_fills_every_pixel() {
    let vp = Viewport::new(8.0, 4.0).unwrap();
    let list = DrawList::new(vp, Rgba8::rgb(0, 0, 26));
    let frame = backend().render(&list).unwrap();
    assert_eq!(frame.width, 8);
    assert_eq!(frame.height, 4);
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.premultiplied);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 26, 255]);
    }
}

#[test]
fn filled_circle_covers_its_center_only() {
    let vp = Viewport::new(40.0, 40.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    p.fill_circle(Point::new(20.0, 20.0), 8.0, Rgba8::rgb(255, 0, 0));
    let frame = backend().render(&p.finish()).unwrap();
    assert_eq!(frame.pixel(20, 20), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn painter_translation_reaches_the_raster() {
    let vp = Viewport::new(40.0, 40.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    p.translate(Vec2::new(30.0, 30.0));
    p.fill_rect(Rect::new(-2.0, -2.0, 2.0, 2.0), Rgba8::WHITE);
    let frame = backend().render(&p.finish()).unwrap();
    assert_eq!(frame.pixel(30, 30), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(10, 10), Some([0, 0, 0, 255]));
}

#[test]
fn stroked_circle_leaves_interior_untouched() {
    let vp = Viewport::new(60.0, 60.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    p.stroke_circle(Point::new(30.0, 30.0), 20.0, 4.0, Rgba8::WHITE);
    let frame = backend().render(&p.finish()).unwrap();
    assert_eq!(frame.pixel(30, 30), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(50, 30), Some([255, 255, 255, 255]));
}

#[test]
fn text_is_skipped_without_a_font() {
    let vp = Viewport::new(20.0, 20.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    p.text(
        "hello",
        Point::new(10.0, 10.0),
        14.0,
        Rgba8::WHITE,
        TextAlign::Center,
        TextBaseline::Middle,
    );
    let mut b = backend();
    assert!(!b.has_font());
    let frame = b.render(&p.finish()).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn image_op_blits_pixels_at_origin() {
    let vp = Viewport::new(10.0, 10.0).unwrap();
    let mut p = Painter::new(vp, Rgba8::BLACK);
    let img = Arc::new(RasterImage {
        width: 2,
        height: 2,
        data: vec![0, 255, 0, 255].repeat(4),
    });
    p.image(img, Point::new(4.0, 4.0));
    let frame = backend().render(&p.finish()).unwrap();
    assert_eq!(frame.pixel(4, 4), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn glow_stops_are_interpolated() {
    let stops = [(0.0, Rgba8::rgba(255, 255, 255, 255)), (1.0, Rgba8::TRANSPARENT)];
    let mid = sample_stops(&stops, 0.5);
    assert_eq!(mid.a, 128);
    assert_eq!(sample_stops(&stops, -1.0), stops[0].1);
    assert_eq!(sample_stops(&stops, 2.0), Rgba8::TRANSPARENT);
    assert_eq!(sample_stops(&[], 0.5), Rgba8::TRANSPARENT);
}

#[test]
fn mismatched_image_bytes_are_rejected() {
    assert!(pixmap_from_premul_bytes(&[0, 0, 0], 1, 1).is_err());
}
