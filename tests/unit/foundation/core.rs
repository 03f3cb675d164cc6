use super::*;

#[test]
fn dims_reject_zero() {
    assert!(Dims::new(0, 4).is_err());
    assert!(Dims::new(4, 0).is_err());
    let d = Dims::new(3, 2).unwrap();
    assert_eq!(d.pixel_count(), 6);
    assert_eq!(d.byte_len(), 24);
}

#[test]
fn intensity_bounds_and_factor() {
    assert!(Intensity::new(101).is_err());
    assert_eq!(Intensity::new(0).unwrap().factor(), 0.0);
    assert_eq!(Intensity::new(100).unwrap().factor(), 1.0);
    assert_eq!(Intensity::new(50).unwrap().factor(), 0.5);
}

#[test]
fn intensity_deserializes_with_validation() {
    let ok: Intensity = serde_json::from_str("75").unwrap();
    assert_eq!(ok.value(), 75);
    assert!(serde_json::from_str::<Intensity>("140").is_err());
}

#[test]
fn from_raw_checks_length() {
    let d = Dims::new(2, 2).unwrap();
    assert!(FrameBuffer::from_raw(d, vec![0; 15]).is_err());
    assert!(FrameBuffer::from_raw(d, vec![0; 16]).is_ok());
}

#[test]
fn pixel_access_is_row_major() {
    let d = Dims::new(3, 2).unwrap();
    let mut fb = FrameBuffer::new(d);
    fb.set_pixel(2, 1, [1, 2, 3, 4]);
    assert_eq!(fb.offset(2, 1), 20);
    assert_eq!(fb.pixel(2, 1), [1, 2, 3, 4]);
    assert_eq!(fb.pixel_at_offset(20), Some([1, 2, 3, 4]));
    assert_eq!(fb.pixel_at_offset(21), None);
    assert_eq!(fb.pixel_at_offset(usize::MAX), None);
    assert_eq!(fb.pixel(3, 0), [0, 0, 0, 0]);
}

#[test]
fn copy_from_requires_matching_dims() {
    let mut a = FrameBuffer::new(Dims::new(2, 2).unwrap());
    let b = FrameBuffer::filled(Dims::new(2, 2).unwrap(), [9, 9, 9, 9]);
    let c = FrameBuffer::new(Dims::new(3, 2).unwrap());
    a.copy_from(&b).unwrap();
    assert_eq!(a, b);
    assert!(a.copy_from(&c).is_err());
}

#[test]
fn resize_of_uniform_buffer_stays_uniform() {
    let src = FrameBuffer::filled(Dims::new(8, 4).unwrap(), [40, 80, 120, 255]);
    let out = src.resized(Dims::new(3, 5).unwrap()).unwrap();
    assert_eq!(out.dims(), Dims::new(3, 5).unwrap());
    assert!(out.as_bytes().chunks_exact(4).all(|px| px == [40, 80, 120, 255]));
}
