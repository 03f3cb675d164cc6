use super::*;

#[test]
fn opaque_frames_cross_unchanged() {
    let dims = Dims::new(5, 3).unwrap();
    let mut rng = fastrand::Rng::with_seed(4);
    let mut bytes = vec![0u8; dims.byte_len()];
    rng.fill(&mut bytes);
    for px in bytes.chunks_exact_mut(4) {
        px[3] = 255;
    }
    let frame = FrameBuffer::from_raw(dims, bytes).unwrap();
    assert_eq!(Surface::from_frame(&frame).to_frame(), frame);
}

#[test]
fn premultiply_scales_by_alpha() {
    assert_eq!(premul_rgba8([255, 255, 255, 128]), [128, 128, 128, 128]);
    assert_eq!(premul_rgba8([90, 10, 200, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremul_rgba8([128, 128, 128, 128]), [255, 255, 255, 128]);
    assert_eq!(unpremul_rgba8([7, 7, 7, 0]), [0, 0, 0, 0]);
}

#[test]
fn clear_and_reallocate() {
    let mut s = Surface::new(Dims::new(2, 2).unwrap());
    assert!(s.as_bytes().iter().all(|&b| b == 0));

    s.clear([10, 20, 30, 255]);
    assert_eq!(&s.as_bytes()[..4], &[10, 20, 30, 255]);

    s.reallocate(Dims::new(3, 1).unwrap());
    assert_eq!(s.dims(), Dims::new(3, 1).unwrap());
    assert_eq!(s.as_bytes().len(), 12);
    assert!(s.as_bytes().iter().all(|&b| b == 0));
}
