use super::*;

#[test]
fn over_with_zero_opacity_is_identity() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 0, 0, 255], 0.0), dst);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
}

#[test]
fn half_opacity_blends_evenly() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    for c in &out[..3] {
        assert!((127..=129).contains(c), "{out:?}");
    }
    assert_eq!(out[3], 255);
}

#[test]
fn blit_is_clipped_to_destination() {
    let mut dst = Bitmap::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let src = Bitmap::filled(3, 3, [255, 255, 255, 255]).unwrap();
    blit_over(&mut dst, &src, 2, -1, 1.0);

    assert_eq!(dst.pixel(2, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(3, 1), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(3, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
}

#[test]
fn blit_fully_outside_is_a_noop() {
    let mut dst = Bitmap::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let before = dst.clone();
    let src = Bitmap::filled(2, 2, [255, 255, 255, 255]).unwrap();
    blit_over(&mut dst, &src, 10, 0, 1.0);
    blit_over(&mut dst, &src, -2, 0, 1.0);
    assert_eq!(dst, before);
}

#[test]
fn copy_replaces_even_transparent_pixels() {
    let mut dst = Bitmap::filled(2, 2, [9, 9, 9, 255]).unwrap();
    let src = Bitmap::new(1, 1).unwrap();
    copy_into(&mut dst, &src, 1, 1);
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(0, 0), Some([9, 9, 9, 255]));
}

#[test]
fn opacity_scales_all_channels() {
    let mut bmp = Bitmap::filled(1, 1, [200, 100, 0, 255]).unwrap();
    multiply_opacity(&mut bmp, 0.0);
    assert_eq!(bmp.pixel(0, 0), Some([0, 0, 0, 0]));

    let mut bmp = Bitmap::filled(1, 1, [200, 100, 0, 255]).unwrap();
    multiply_opacity(&mut bmp, 1.0);
    assert_eq!(bmp.pixel(0, 0), Some([200, 100, 0, 255]));
}

#[test]
fn coverage_mask_clears_and_keeps() {
    let mut bmp = Bitmap::filled(2, 1, [100, 100, 100, 255]).unwrap();
    apply_coverage(&mut bmp, &[0, 255]);
    assert_eq!(bmp.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(bmp.pixel(1, 0), Some([100, 100, 100, 255]));

    let before = bmp.clone();
    apply_coverage(&mut bmp, &[0]);
    assert_eq!(bmp, before);
}
