use super::*;
use crate::env::weather::EnvFactor;
use crate::foundation::core::{Dims, FrameTime};
use crate::modes::EffectMode;
use crate::modes::atmosphere::AtmosphereMode;

fn field(mode: AtmosphereMode, env: &EnvFactor, elapsed_ms: f64, dims: Dims) -> AtmosphereField {
    AtmosphereField::new(
        mode,
        0.5,
        FrameTime {
            elapsed_ms,
            wall_unix_ms: 1_700_000_000_000,
        },
        0,
        env,
        dims,
    )
}

fn target_rgb(f: &AtmosphereField, x: u32, y: u32) -> [f64; 3] {
    let s = f.sample(x, y);
    let shade = vignette(s.edge, f.time_s());
    s.hsl.to_rgb().map(|c| clamp_channel(c + shade))
}

#[test]
fn first_tick_fades_in_from_black() {
    let dims = Dims::new(6, 4).unwrap();
    let f = field(AtmosphereMode::Dawn, &EnvFactor::UNKNOWN, 0.0, dims);
    let mut out = FrameBuffer::new(dims);
    let mut prev = FrameBuffer::new(dims);
    transform_atmosphere(&f, &mut out, &mut prev).unwrap();

    for y in 0..4 {
        for x in 0..6 {
            let px = out.pixel(x, y);
            let want = target_rgb(&f, x, y);
            assert_eq!(px[3], 255);
            for c in 0..3 {
                let staged = f64::from(channel_u8(want[c]));
                let expect = channel_u8(lerp(lerp(staged, want[c], 0.8), 0.0, 0.88));
                assert_eq!(px[c], expect);
            }
        }
    }
    assert_eq!(prev, out);
}

#[test]
fn repeated_ticks_converge_to_target() {
    let dims = Dims::new(5, 5).unwrap();
    let f = field(AtmosphereMode::Aurora, &EnvFactor::UNKNOWN, 2500.0, dims);
    let mut out = FrameBuffer::new(dims);
    let mut prev = FrameBuffer::new(dims);
    for _ in 0..120 {
        transform_atmosphere(&f, &mut out, &mut prev).unwrap();
    }
    for y in 0..5 {
        for x in 0..5 {
            let want = target_rgb(&f, x, y);
            let px = out.pixel(x, y);
            for c in 0..3 {
                assert!((f64::from(px[c]) - want[c]).abs() <= 5.0, "{px:?} vs {want:?}");
            }
        }
    }
}

#[test]
fn history_weights_previous_frame() {
    let dims = Dims::new(2, 2).unwrap();
    let f = field(AtmosphereMode::Storm, &EnvFactor::UNKNOWN, 0.0, dims);
    let mut from_black = FrameBuffer::new(dims);
    let mut prev_black = FrameBuffer::new(dims);
    let mut from_white = FrameBuffer::new(dims);
    let mut prev_white = FrameBuffer::filled(dims, [255, 255, 255, 255]);
    transform_atmosphere(&f, &mut from_black, &mut prev_black).unwrap();
    transform_atmosphere(&f, &mut from_white, &mut prev_white).unwrap();
    for (b, w) in from_black
        .as_bytes()
        .chunks_exact(4)
        .zip(from_white.as_bytes().chunks_exact(4))
    {
        for c in 0..3 {
            // 0.88 * 255 separates the two histories.
            assert!(w[c] >= b[c] + 220, "{b:?} {w:?}");
        }
    }
}

#[test]
fn absent_env_renders_like_neutral_env() {
    let dims = Dims::new(8, 3).unwrap();
    let neutral = EnvFactor {
        temperature: None,
        weather_code: Some(1),
        windspeed: None,
    };
    for &mode in AtmosphereMode::ALL {
        let mut a = FrameBuffer::new(dims);
        let mut pa = FrameBuffer::new(dims);
        let mut b = FrameBuffer::new(dims);
        let mut pb = FrameBuffer::new(dims);
        transform_atmosphere(&field(mode, &EnvFactor::UNKNOWN, 900.0, dims), &mut a, &mut pa)
            .unwrap();
        transform_atmosphere(&field(mode, &neutral, 900.0, dims), &mut b, &mut pb).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn mismatched_history_is_rejected() {
    let f = field(
        AtmosphereMode::Dawn,
        &EnvFactor::UNKNOWN,
        0.0,
        Dims::new(4, 4).unwrap(),
    );
    let mut out = FrameBuffer::new(Dims::new(4, 4).unwrap());
    let mut prev = FrameBuffer::new(Dims::new(2, 2).unwrap());
    assert!(transform_atmosphere(&f, &mut out, &mut prev).is_err());
}
