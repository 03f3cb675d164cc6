use super::*;
use crate::foundation::core::Dims;
use crate::modes::EffectMode;

fn gray(w: u32, h: u32) -> FrameBuffer {
    FrameBuffer::filled(Dims::new(w, h).unwrap(), [128, 128, 128, 255])
}

fn intensity(v: u32) -> Intensity {
    Intensity::new(v).unwrap()
}

#[test]
fn tone_params_follow_intensity() {
    let lo = ToneParams::new(DistortionMode::Prism, intensity(0));
    assert_eq!(lo.levels, 18);
    assert!((lo.contrast - 1.8).abs() < 1e-12);
    assert!((lo.saturation - 1.45).abs() < 1e-12);

    let hi = ToneParams::new(DistortionMode::Fracture, intensity(100));
    assert_eq!(hi.levels, 8);
    assert!((hi.contrast - 1.65).abs() < 1e-12);
    assert!((hi.saturation - 2.25).abs() < 1e-12);
}

#[test]
fn posterize_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..2_000 {
        let levels = rng.u32(0..40);
        let v = rng.f64() * 255.0;
        let once = posterize(v, levels);
        assert_eq!(posterize(once, levels), once);
        assert!(once <= v);
    }
    assert_eq!(posterize(255.0, 0), 254.0);
}

#[test]
fn prism_reference_pixel_on_gray_source() {
    let src = gray(4, 4);
    let mut out = FrameBuffer::new(src.dims());
    transform_distortion(&src, &mut out, DistortionMode::Prism, intensity(50), 0.0).unwrap();

    assert_eq!(out.pixel(0, 0), [169, 91, 156, 255]);
    assert_eq!(out.pixel(3, 0), [182, 78, 169, 255]);
    // Only the x-dependent drift varies across a uniform source.
    for y in 1..4 {
        for x in 0..4 {
            assert_eq!(out.pixel(x, y), out.pixel(x, 0));
        }
    }
}

#[test]
fn fracture_shards_swap_channels() {
    let rgb = [10.0, 20.0, 30.0];
    assert_eq!(
        color_effect(DistortionMode::Fracture, rgb, 0, 0, 0.0, 1.0),
        [20.0, 10.0, 30.0]
    );
    assert_eq!(
        color_effect(DistortionMode::Fracture, rgb, 1, 0, 0.0, 1.0),
        rgb
    );
    assert_eq!(
        color_effect(DistortionMode::Fracture, rgb, 1, 1, 0.0, 1.0),
        [10.0, 30.0, 20.0]
    );
    assert_eq!(
        color_effect(DistortionMode::Fracture, rgb, 2, 2, 0.0, 1.0),
        [50.0, 20.0, 30.0]
    );
    // floor(5 * 0.2) = 1 advances the pattern by one shard.
    assert_eq!(
        color_effect(DistortionMode::Fracture, rgb, 0, 0, 5.0, 1.0),
        rgb
    );
}

#[test]
fn aurora_rescales_red_and_lifts_blue() {
    let out = color_effect(DistortionMode::Aurora, [100.0, 100.0, 100.0], 0, 0, 0.0, 0.0);
    assert_eq!(out, [75.0, 100.0, 120.0]);
}

#[test]
fn output_channels_are_bytes_for_random_inputs() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..60 {
        let (w, h) = (rng.u32(1..12), rng.u32(1..12));
        let dims = Dims::new(w, h).unwrap();
        let mut bytes = vec![0u8; dims.byte_len()];
        rng.fill(&mut bytes);
        let src = FrameBuffer::from_raw(dims, bytes).unwrap();
        let mut out = FrameBuffer::new(dims);
        let mode = DistortionMode::ALL[rng.usize(..3)];
        let level = intensity(rng.u32(0..=100));
        let tone = ToneParams::new(mode, level);
        transform_distortion(&src, &mut out, mode, level, rng.f64() * 1.0e6).unwrap();

        for px in out.as_bytes().chunks_exact(4) {
            for &c in &px[..3] {
                assert_eq!(u32::from(c) % tone.levels, 0);
            }
        }
    }
}

#[test]
fn alpha_passes_through_from_sample() {
    let dims = Dims::new(3, 3).unwrap();
    let src = FrameBuffer::filled(dims, [50, 60, 70, 99]);
    let mut out = FrameBuffer::new(dims);
    transform_distortion(&src, &mut out, DistortionMode::Aurora, intensity(100), 1.0).unwrap();
    assert!(out.as_bytes().chunks_exact(4).all(|px| px[3] == 99));
}

#[test]
fn boundary_intensities_are_finite() {
    let src = gray(5, 3);
    for &mode in DistortionMode::ALL {
        for level in [0, 100] {
            let mut out = FrameBuffer::new(src.dims());
            transform_distortion(&src, &mut out, mode, intensity(level), 16.7).unwrap();
        }
    }
}

#[test]
fn mismatched_buffers_are_rejected() {
    let src = gray(4, 4);
    let mut out = FrameBuffer::new(Dims::new(4, 3).unwrap());
    let err = transform_distortion(&src, &mut out, DistortionMode::Prism, intensity(1), 0.0)
        .unwrap_err();
    assert!(matches!(err, LucentError::Render(_)));
}

#[test]
fn zero_alpha_reads_as_opaque() {
    let dims = Dims::new(3, 2).unwrap();
    let src = FrameBuffer::filled(dims, [50, 60, 70, 0]);
    let mut out = FrameBuffer::new(dims);
    transform_distortion(&src, &mut out, DistortionMode::Prism, intensity(40), 0.0).unwrap();
    assert!(out.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
}
