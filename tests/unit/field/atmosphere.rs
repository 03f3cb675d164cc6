use super::*;
use crate::modes::EffectMode;

const NOON_2025_06_21: i64 = 1_750_507_200_000;

fn time(elapsed_ms: f64) -> FrameTime {
    FrameTime {
        elapsed_ms,
        wall_unix_ms: NOON_2025_06_21,
    }
}

fn dims() -> Dims {
    Dims::new(16, 9).unwrap()
}

#[test]
fn samples_are_in_range_for_every_mode() {
    let mut rng = fastrand::Rng::with_seed(42);
    for &mode in AtmosphereMode::ALL {
        for _ in 0..300 {
            let env = EnvFactor {
                temperature: Some(rng.f64() * 80.0 - 40.0),
                weather_code: Some(rng.u32(0..100)),
                windspeed: Some(rng.f64() * 120.0),
            };
            let field = AtmosphereField::new(
                mode,
                f64::from(rng.u32(0..=100)) / 100.0,
                time(rng.f64() * 1.0e8),
                0,
                &env,
                dims(),
            );
            let s = field.sample(rng.u32(0..16), rng.u32(0..9));
            assert!((0.0..360.0).contains(&s.hsl.hue));
            assert!((0.0..=1.0).contains(&s.hsl.saturation));
            assert!((0.0..=1.0).contains(&s.hsl.lightness));
            assert!((0.0..=1.0).contains(&s.edge));
        }
    }
}

#[test]
fn absent_env_matches_documented_neutral_record() {
    let neutral = EnvFactor {
        temperature: None,
        weather_code: Some(1),
        windspeed: None,
    };
    for &mode in AtmosphereMode::ALL {
        let a = AtmosphereField::new(mode, 0.7, time(4321.0), 0, &EnvFactor::UNKNOWN, dims());
        let b = AtmosphereField::new(mode, 0.7, time(4321.0), 0, &neutral, dims());
        for y in 0..9 {
            for x in 0..16 {
                assert_eq!(a.sample(x, y), b.sample(x, y));
            }
        }
    }
}

#[test]
fn wind_speeds_up_the_time_axis() {
    let calm = AtmosphereField::new(
        AtmosphereMode::Storm,
        0.5,
        time(10_000.0),
        0,
        &EnvFactor::UNKNOWN,
        dims(),
    );
    let windy = AtmosphereField::new(
        AtmosphereMode::Storm,
        0.5,
        time(10_000.0),
        0,
        &EnvFactor {
            windspeed: Some(60.0),
            ..EnvFactor::UNKNOWN
        },
        dims(),
    );
    assert_eq!(calm.time_s(), 10.0);
    assert_eq!(windy.time_s(), 15.0);
}

#[test]
fn warm_air_shifts_hue_down() {
    let cold = AtmosphereField::new(
        AtmosphereMode::Aurora,
        0.5,
        time(0.0),
        0,
        &EnvFactor::UNKNOWN,
        dims(),
    );
    let hot = AtmosphereField::new(
        AtmosphereMode::Aurora,
        0.5,
        time(0.0),
        0,
        &EnvFactor {
            temperature: Some(40.0),
            ..EnvFactor::UNKNOWN
        },
        dims(),
    );
    let d = cold.sample(3, 3).hsl.hue - hot.sample(3, 3).hsl.hue;
    assert!((d - 20.0).abs() < 1e-9, "{d}");
}

#[test]
fn edge_term_peaks_at_center_and_vanishes_on_border() {
    let f = AtmosphereField::new(
        AtmosphereMode::Dawn,
        0.5,
        time(0.0),
        0,
        &EnvFactor::UNKNOWN,
        Dims::new(4, 4).unwrap(),
    );
    assert_eq!(f.sample(0, 2).edge, 0.0);
    assert!((f.sample(2, 2).edge - 1.0).abs() < 1e-12);
    assert_eq!(f.clock().day_of_year, 172);
}

#[test]
fn same_inputs_are_deterministic() {
    let a = AtmosphereField::new(
        AtmosphereMode::Storm,
        0.9,
        time(777.0),
        120,
        &EnvFactor::UNKNOWN,
        dims(),
    );
    let b = a;
    assert_eq!(a.sample(5, 5), b.sample(5, 5));
}
