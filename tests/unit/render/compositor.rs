use super::*;
use crate::foundation::core::Dims;

fn dims(w: u32, h: u32) -> Dims {
    Dims::new(w, h).unwrap()
}

fn intensity(v: u32) -> Intensity {
    Intensity::new(v).unwrap()
}

#[test]
fn distortion_plan_has_five_passes_in_order() {
    let plan = distortion_plan(DistortionMode::Prism, intensity(50), 0.0);
    assert_eq!(plan.passes.len(), 5);
    assert!(matches!(plan.passes[0], Pass::Clear { rgba: CLEAR_COLOR }));

    let Pass::Draw { offset, state } = &plan.passes[1] else {
        panic!("expected base draw");
    };
    assert_eq!(*offset, Vec2::ZERO);
    assert_eq!(state.blend, BlendMode::Normal);
    assert_eq!(state.opacity, 1.0);
    let [Filter::Saturate(s), Filter::Contrast(c)] = state.filters[..] else {
        panic!("unexpected filters {:?}", state.filters);
    };
    assert!((s - 1.7).abs() < 1e-6);
    assert!((c - 1.3).abs() < 1e-6);

    let Pass::Draw { offset, state } = &plan.passes[2] else {
        panic!("expected glow draw");
    };
    assert!(offset.x.abs() < 1e-12);
    assert!((offset.y - 3.0).abs() < 1e-12);
    assert_eq!(state.blend, BlendMode::Screen);
    assert!((state.opacity - 0.28).abs() < 1e-6);
    let [Filter::Blur(sigma)] = state.filters[..] else {
        panic!("unexpected filters {:?}", state.filters);
    };
    assert!((sigma - (1.0 + 50.0 / 60.0)).abs() < 1e-5);

    let Pass::Fill { rgb, alpha, state } = &plan.passes[3] else {
        panic!("expected tint fill");
    };
    assert_eq!(*rgb, [157, 255, 214]);
    assert!((alpha - (0.35 + 50.0 / 300.0)).abs() < 1e-5);
    assert_eq!(state.blend, BlendMode::Color);

    let Pass::LinearGradient { stops, state, .. } = &plan.passes[4] else {
        panic!("expected sheen");
    };
    assert_eq!(stops.len(), 3);
    assert_eq!(*state, DrawState::default());
}

#[test]
fn neutral_atmosphere_plan_reproduces_opaque_frame() {
    let d = dims(5, 4);
    let mut rng = fastrand::Rng::with_seed(3);
    let mut bytes = vec![0u8; d.byte_len()];
    rng.fill(&mut bytes);
    for px in bytes.chunks_exact_mut(4) {
        px[3] = 255;
    }
    let frame = FrameBuffer::from_raw(d, bytes).unwrap();

    let mut surface = Surface::new(d);
    Compositor::new()
        .execute(&atmosphere_plan(intensity(50)), &frame, &mut surface)
        .unwrap();
    assert_eq!(surface.to_frame(), frame);
}

#[test]
fn state_is_neutral_after_execute_and_runs_repeat() {
    let d = dims(8, 6);
    let frame = FrameBuffer::filled(dims(4, 3), [90, 140, 200, 255]);
    let plan = distortion_plan(DistortionMode::Fracture, intensity(80), 1234.0);
    let mut compositor = Compositor::new();

    let mut a = Surface::new(d);
    compositor.execute(&plan, &frame, &mut a).unwrap();
    assert_eq!(*compositor.state(), DrawState::default());

    let mut b = Surface::new(d);
    compositor.execute(&plan, &frame, &mut b).unwrap();
    assert_eq!(a, b);
    assert!(a.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn shifted_draw_leaves_uncovered_pixels_cleared() {
    let frame = FrameBuffer::filled(dims(4, 2), [255, 255, 255, 255]);
    let plan = CompositePlan {
        passes: vec![
            Pass::Clear { rgba: CLEAR_COLOR },
            Pass::Draw {
                offset: Vec2::new(2.0, 0.0),
                state: DrawState::default(),
            },
        ],
    };
    let mut surface = Surface::new(dims(4, 2));
    Compositor::new().execute(&plan, &frame, &mut surface).unwrap();
    let out = surface.to_frame();
    for y in 0..2 {
        assert_eq!(out.pixel(0, y), [0, 0, 0, 255]);
        assert_eq!(out.pixel(1, y), [0, 0, 0, 255]);
        assert_eq!(out.pixel(2, y), [255, 255, 255, 255]);
        assert_eq!(out.pixel(3, y), [255, 255, 255, 255]);
    }
}

#[test]
fn sheen_gradient_brightens_corners() {
    let plan = distortion_plan(DistortionMode::Aurora, intensity(0), 0.0);
    let sheen = CompositePlan {
        passes: vec![Pass::Clear { rgba: CLEAR_COLOR }, plan.passes[4].clone()],
    };
    let mut surface = Surface::new(dims(10, 10));
    Compositor::new()
        .execute(&sheen, &FrameBuffer::new(dims(1, 1)), &mut surface)
        .unwrap();
    let out = surface.to_frame();
    assert_eq!(out.pixel(0, 0), [11, 11, 11, 255]);
    assert_eq!(out.pixel(9, 9), [18, 18, 18, 255]);
    assert!(out.pixel(5, 4)[0] < out.pixel(0, 0)[0]);
}

#[test]
fn color_fill_tints_without_changing_luminosity_much() {
    let plan = CompositePlan {
        passes: vec![
            Pass::Clear {
                rgba: [128, 128, 128, 255],
            },
            Pass::Fill {
                rgb: [255, 0, 0],
                alpha: 1.0,
                state: DrawState {
                    blend: BlendMode::Color,
                    opacity: 1.0,
                    filters: Vec::new(),
                },
            },
        ],
    };
    let mut surface = Surface::new(dims(2, 2));
    Compositor::new()
        .execute(&plan, &FrameBuffer::new(dims(1, 1)), &mut surface)
        .unwrap();
    let px = surface.to_frame().pixel(1, 1);
    assert!(px[0] > px[1]);
    assert_eq!(px[1], px[2]);
    assert_eq!(px[3], 255);
}
