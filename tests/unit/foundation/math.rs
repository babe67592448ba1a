use super::*;

#[test]
fn fnv_hash_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"filmcam");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"film");
    b.write_bytes(b"cam");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 255), 0);
    assert_eq!(mul_div255(128, 255), 128);
    assert_eq!(mul_div255(255, 1), 1);
}

#[test]
fn clamp_u8_saturates() {
    assert_eq!(clamp_u8(-12.0), 0);
    assert_eq!(clamp_u8(300.0), 255);
    assert_eq!(clamp_u8(f32::NAN), 0);
    assert_eq!(clamp_u8(127.5), 128);
}

#[test]
fn luma_of_gray_is_gray() {
    assert!((luma601(90.0, 90.0, 90.0) - 90.0).abs() < 1e-3);
}
