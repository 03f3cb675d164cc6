use super::*;

fn assert_rgb_close(got: [f64; 3], want: [f64; 3]) {
    for c in 0..3 {
        assert!((got[c] - want[c]).abs() < 1e-6, "got {got:?} want {want:?}");
    }
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn primaries_land_in_their_sectors() {
    assert_rgb_close(Hsl::new(0.0, 1.0, 0.5).to_rgb(), [255.0, 0.0, 0.0]);
    assert_rgb_close(Hsl::new(120.0, 1.0, 0.5).to_rgb(), [0.0, 255.0, 0.0]);
    assert_rgb_close(Hsl::new(240.0, 1.0, 0.5).to_rgb(), [0.0, 0.0, 255.0]);
    assert_rgb_close(Hsl::new(60.0, 1.0, 0.5).to_rgb(), [255.0, 255.0, 0.0]);
    assert_rgb_close(Hsl::new(300.0, 1.0, 0.5).to_rgb(), [255.0, 0.0, 255.0]);
}

#[test]
fn hue_wraps_into_range() {
    assert_eq!(Hsl::new(-30.0, 0.5, 0.5).hue, 330.0);
    assert_eq!(Hsl::new(720.0, 0.5, 0.5).hue, 0.0);
    assert_eq!(Hsl::new(f64::NAN, 0.5, 0.5).hue, 0.0);
}

#[test]
fn zero_saturation_is_gray_for_any_hue() {
    for hue in [0.0, 45.0, 133.0, 359.9] {
        let [r, g, b] = Hsl::new(hue, 0.0, 0.4).to_rgb();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}

#[test]
fn round_trip_preserves_hue_when_saturated() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..500 {
        let hsl = Hsl::new(rng.f64() * 360.0, 0.3 + rng.f64() * 0.7, 0.25 + rng.f64() * 0.5);
        let rgb = hsl.to_rgb().map(f64::round);
        let back = Hsl::from_rgb(rgb);
        assert!(
            hue_distance(back.hue, hsl.hue) < 3.0,
            "{hsl:?} -> {rgb:?} -> {back:?}"
        );
    }
}
