use super::*;

const MODES: [BlendMode; 5] = [
    BlendMode::Overlay,
    BlendMode::Screen,
    BlendMode::Multiply,
    BlendMode::ColorBurn,
    BlendMode::SoftLight,
];

fn gradient(w: u32, h: u32) -> Bitmap {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[
                (x * 255 / w.max(1)) as u8,
                (y * 255 / h.max(1)) as u8,
                ((x + y) * 7 % 256) as u8,
                200,
            ]);
        }
    }
    Bitmap::new(w, h, data).unwrap()
}

#[test]
fn blend_layer_opacity_0_is_noop_for_every_mode() {
    let src = gradient(16, 8);
    for mode in MODES {
        let mut b = src.clone();
        blend_layer(&mut b, Rgba8::rgb(12, 200, 99), mode, 0.0);
        assert_eq!(b, src, "{mode:?}");
    }
}

#[test]
fn white_multiply_at_full_opacity_is_identity() {
    let src = gradient(16, 8);
    let mut b = src.clone();
    blend_layer(&mut b, Rgba8::rgb(255, 255, 255), BlendMode::Multiply, 1.0);
    assert_eq!(b, src);
}

#[test]
fn blend_layer_never_touches_alpha() {
    let src = gradient(8, 8);
    for mode in MODES {
        let mut b = src.clone();
        blend_layer(&mut b, Rgba8::rgb(30, 60, 90), mode, 0.8);
        for (o, i) in b.pixels().zip(src.pixels()) {
            assert_eq!(o[3], i[3]);
        }
    }
}

#[test]
fn blend_formulas_match_reference_points() {
    assert_eq!(blend_channel(BlendMode::Screen, 0, 0), 0.0);
    assert_eq!(blend_channel(BlendMode::Screen, 255, 0), 255.0);
    assert_eq!(blend_channel(BlendMode::Screen, 128, 128), 192.0);
    assert_eq!(blend_channel(BlendMode::Multiply, 128, 128), 64.0);
    assert_eq!(blend_channel(BlendMode::ColorBurn, 255, 0), 255.0);
    assert_eq!(blend_channel(BlendMode::ColorBurn, 100, 0), 0.0);
    assert_eq!(blend_channel(BlendMode::ColorBurn, 40, 255), 40.0);
    // Overlay branches on the base channel.
    assert!((blend_channel(BlendMode::Overlay, 64, 255) - 128.0).abs() < 1e-3);
    assert!((blend_channel(BlendMode::Overlay, 200, 0) - 145.0).abs() < 0.5);
    // Soft light with a mid-gray layer is identity.
    let v = blend_channel(BlendMode::SoftLight, 77, 128);
    assert!((v - 77.0).abs() < 0.6);
}

#[test]
fn screen_lightens_and_multiply_darkens() {
    let src = gradient(8, 8);
    let mut lighter = src.clone();
    blend_layer(&mut lighter, Rgba8::rgb(90, 90, 90), BlendMode::Screen, 1.0);
    let mut darker = src.clone();
    blend_layer(&mut darker, Rgba8::rgb(90, 90, 90), BlendMode::Multiply, 1.0);
    for ((l, d), s) in lighter.pixels().zip(darker.pixels()).zip(src.pixels()) {
        for c in 0..3 {
            assert!(l[c] >= s[c]);
            assert!(d[c] <= s[c]);
        }
    }
}

#[test]
fn adjust_clamps_extreme_contrast_without_wrapping() {
    let mut b = Bitmap::filled(2, 2, Rgba8::rgb(250, 5, 128)).unwrap();
    adjust(
        &mut b,
        BaseAdjust {
            contrast: 3.0,
            ..BaseAdjust::IDENTITY
        },
    );
    assert_eq!(b.pixel(0, 0), Some([255, 0, 128, 255]));

    let mut b = Bitmap::filled(1, 1, Rgba8::rgb(250, 250, 250)).unwrap();
    adjust(
        &mut b,
        BaseAdjust {
            contrast: 3.0,
            saturation: 5.0,
            brightness: 4.0,
            sepia: 1.0,
        },
    );
    let px = b.pixel(0, 0).unwrap();
    assert_eq!(&px[..2], &[255, 255]);
    // Sepia pulls blue down from white but never wraps.
    assert!((230..=245).contains(&px[2]));
    assert_eq!(px[3], 255);
}

#[test]
fn adjust_identity_is_noop() {
    let src = gradient(9, 5);
    let mut b = src.clone();
    adjust(&mut b, BaseAdjust::IDENTITY);
    assert_eq!(b, src);
}

#[test]
fn adjust_zero_saturation_yields_gray() {
    let mut b = gradient(9, 5);
    adjust(
        &mut b,
        BaseAdjust {
            saturation: 0.0,
            ..BaseAdjust::IDENTITY
        },
    );
    for px in b.pixels() {
        assert!(px[0].abs_diff(px[1]) <= 1 && px[1].abs_diff(px[2]) <= 1);
    }
}

#[test]
fn adjust_full_sepia_warms_gray() {
    let mut b = Bitmap::filled(1, 1, Rgba8::rgb(100, 100, 100)).unwrap();
    adjust(
        &mut b,
        BaseAdjust {
            sepia: 1.0,
            ..BaseAdjust::IDENTITY
        },
    );
    let px = b.pixel(0, 0).unwrap();
    assert!(px[0] > px[1] && px[1] > px[2]);
}

#[test]
fn zero_sized_bitmap_is_a_noop_everywhere() {
    let mut b = Bitmap::new(0, 0, Vec::new()).unwrap();
    adjust(
        &mut b,
        BaseAdjust {
            contrast: 2.0,
            ..BaseAdjust::IDENTITY
        },
    );
    blend_layer(&mut b, Rgba8::rgb(1, 2, 3), BlendMode::Overlay, 1.0);
    let other = b.clone();
    blend_bitmap(&mut b, &other, BlendMode::Screen, 1.0).unwrap();
    assert!(b.is_empty());
}

#[test]
fn blend_bitmap_rejects_size_mismatch() {
    let mut a = gradient(4, 4);
    let b = gradient(4, 3);
    assert!(blend_bitmap(&mut a, &b, BlendMode::Screen, 0.5).is_err());
}

#[test]
fn blend_bitmap_with_flat_source_matches_blend_layer() {
    let src = gradient(12, 6);
    let color = Rgba8::rgb(180, 40, 220);
    let flat = Bitmap::filled(12, 6, color).unwrap();
    for mode in MODES {
        let mut via_layer = src.clone();
        blend_layer(&mut via_layer, color, mode, 0.4);
        let mut via_bitmap = src.clone();
        blend_bitmap(&mut via_bitmap, &flat, mode, 0.4).unwrap();
        assert_eq!(via_layer, via_bitmap, "{mode:?}");
    }
}
