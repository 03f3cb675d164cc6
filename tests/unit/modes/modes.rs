use super::atmosphere::AtmosphereMode;
use super::distortion::DistortionMode;
use super::*;

#[test]
fn keys_round_trip_through_from_str() {
    for &m in DistortionMode::ALL {
        assert_eq!(m.key().parse::<DistortionMode>().unwrap(), m);
        assert_eq!(m.to_string(), m.key());
    }
    for &m in AtmosphereMode::ALL {
        assert_eq!(m.key().parse::<AtmosphereMode>().unwrap(), m);
    }
}

#[test]
fn unknown_keys_are_rejected() {
    let err = "Prism".parse::<DistortionMode>().unwrap_err();
    assert!(err.to_string().contains("unknown mode 'Prism'"));
    assert!("dawn".parse::<DistortionMode>().is_err());
    assert!("prism".parse::<AtmosphereMode>().is_err());
    assert!("".parse::<AtmosphereMode>().is_err());
}

#[test]
fn distortion_table_matches_presets() {
    let p = DistortionMode::Prism.config();
    assert_eq!(p.displacement, 11.0);
    assert_eq!(p.tint, [157, 255, 214]);
    let f = DistortionMode::Fracture.config();
    assert_eq!((f.contrast, f.saturation), (1.65, 1.8));
    assert_eq!(DistortionMode::Aurora.config().displacement, 8.0);
}

#[test]
fn serde_uses_lowercase_keys() {
    let m: AtmosphereMode = serde_json::from_str("\"storm\"").unwrap();
    assert_eq!(m, AtmosphereMode::Storm);
    assert_eq!(
        serde_json::to_string(&DistortionMode::Fracture).unwrap(),
        "\"fracture\""
    );
}
