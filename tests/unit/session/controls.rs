use super::*;
use crate::foundation::error::LucentError;
use crate::modes::atmosphere::AtmosphereMode;
use crate::modes::distortion::DistortionMode;

#[test]
fn parse_accepts_known_keys() {
    let c = Controls::<DistortionMode>::parse("fracture", 75).unwrap();
    assert_eq!(c.mode, DistortionMode::Fracture);
    assert_eq!(c.intensity.value(), 75);

    let c = Controls::<AtmosphereMode>::parse("storm", 0).unwrap();
    assert_eq!(c.mode, AtmosphereMode::Storm);
}

#[test]
fn parse_rejects_unknown_mode_and_range() {
    let err = Controls::<DistortionMode>::parse("dawn", 50).unwrap_err();
    assert!(matches!(err, LucentError::Validation(_)));
    assert!(Controls::<DistortionMode>::parse("prism", 101).is_err());
}

#[test]
fn default_is_first_mode_at_half_strength() {
    let c = Controls::<AtmosphereMode>::default();
    assert_eq!(c.mode, AtmosphereMode::Dawn);
    assert_eq!(c.intensity.value(), 50);
}
