use super::*;

#[test]
fn zero_dimensions_are_rejected() {
    assert!(Bitmap::new(0, 10).is_err());
    assert!(Bitmap::new(10, 0).is_err());
    assert!(Bitmap::new(1, 1).is_ok());
}

#[test]
fn filled_and_pixel_access() {
    let mut bmp = Bitmap::filled(3, 2, [1, 2, 3, 255]).unwrap();
    assert_eq!(bmp.data().len(), 3 * 2 * 4);
    assert_eq!(bmp.pixel(2, 1), Some([1, 2, 3, 255]));
    assert_eq!(bmp.pixel(3, 0), None);

    bmp.set_pixel(0, 0, [9, 9, 9, 9]);
    bmp.set_pixel(100, 100, [7, 7, 7, 7]);
    assert_eq!(bmp.pixel(0, 0), Some([9, 9, 9, 9]));
    assert_eq!(bmp.pixel(0, 1), Some([1, 2, 3, 255]));
}

#[test]
fn byte_length_must_match_dimensions() {
    assert!(Bitmap::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn straight_input_is_premultiplied() {
    let bmp = Bitmap::from_straight_rgba8(1, 1, vec![200, 100, 50, 0]).unwrap();
    assert_eq!(bmp.pixel(0, 0), Some([0, 0, 0, 0]));

    let bmp = Bitmap::from_straight_rgba8(1, 1, vec![200, 100, 50, 255]).unwrap();
    assert_eq!(bmp.to_straight_rgba8(), vec![200, 100, 50, 255]);
}

#[test]
fn landscape_detection() {
    assert!(Bitmap::new(4, 3).unwrap().is_landscape());
    assert!(!Bitmap::new(3, 3).unwrap().is_landscape());
    assert!(!Bitmap::new(3, 4).unwrap().is_landscape());
}
