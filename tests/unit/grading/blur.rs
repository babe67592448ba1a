use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn radius_0_is_identity() {
    let src = Bitmap::new(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(blur(&src, 0), src);
}

#[test]
fn constant_image_is_unchanged() {
    let src = Bitmap::filled(6, 5, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(blur(&src, 4), src);
}

#[test]
fn spreads_energy_from_single_pixel() {
    let (w, h) = (7u32, 7u32);
    let mut data = vec![0u8; (w * h * 4) as usize];
    let center = ((3 * w + 3) * 4) as usize;
    data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let src = Bitmap::new(w, h, data).unwrap();

    let out = blur(&src, 2);

    let lit = out.pixels().filter(|px| px[0] != 0).count();
    assert!(lit > 1);
    let sum: u32 = out.pixels().map(|px| u32::from(px[0])).sum();
    assert!((sum as i32 - 255).abs() <= 20);
}

#[test]
fn is_deterministic() {
    let mut data = Vec::new();
    for i in 0..(9 * 4 * 4) {
        data.push((i * 37 % 251) as u8);
    }
    let src = Bitmap::new(9, 4, data).unwrap();
    assert_eq!(blur(&src, 3), blur(&src, 3));
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for r in [1u32, 3, 5, 11, 17] {
        let k = gaussian_kernel_q16(r, sigma_for_radius(r));
        assert_eq!(k.len(), (2 * r + 1) as usize);
        assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
    }
}

#[test]
fn empty_bitmap_passes_through() {
    let src = Bitmap::new(0, 3, Vec::new()).unwrap();
    assert!(blur(&src, 5).is_empty());
}

#[test]
fn edge_column_spreads_along_rows_only() {
    let (w, h) = (6u32, 4u32);
    let mut data = Vec::new();
    for _y in 0..h {
        for x in 0..w {
            let v = if x == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let out = blur(&Bitmap::new(w, h, data).unwrap(), 2);

    let first_row: Vec<[u8; 4]> = (0..w).map(|x| out.pixel(x, 0).unwrap()).collect();
    for y in 1..h {
        for x in 0..w {
            assert_eq!(out.pixel(x, y).unwrap(), first_row[x as usize]);
        }
    }
    assert!(first_row.iter().all(|px| px[3] == 255));
    assert!(first_row.windows(2).all(|p| p[0][0] >= p[1][0]));
    assert!(first_row[0][0] > first_row[5][0]);
    assert!(first_row[0][0] < 255);
}
