use crate::modes::EffectMode;

/// Camera distortion presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistortionMode {
    /// Gentle ripple with a sinusoidal RGB drift.
    Prism,
    /// Bit-masked tiling offsets and channel-swapped shards.
    Fracture,
    /// Slow secondary ripple with a cool pulse.
    Aurora,
}

/// Static tuning record owned by each [`DistortionMode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistortionConfig {
    /// Peak displacement in processing pixels at full intensity.
    pub displacement: f64,
    /// Base contrast multiplier around mid-gray.
    pub contrast: f64,
    /// Base saturation multiplier around luminance.
    pub saturation: f64,
    /// Tint used by the color-blend overlay.
    pub tint: [u8; 3],
}

const PRISM: DistortionConfig = DistortionConfig {
    displacement: 11.0,
    contrast: 1.35,
    saturation: 1.45,
    tint: [157, 255, 214],
};

const FRACTURE: DistortionConfig = DistortionConfig {
    displacement: 18.0,
    contrast: 1.65,
    saturation: 1.8,
    tint: [255, 100, 212],
};

const AURORA: DistortionConfig = DistortionConfig {
    displacement: 8.0,
    contrast: 1.25,
    saturation: 1.2,
    tint: [127, 222, 255],
};

impl DistortionMode {
    /// Borrow the preset's static configuration.
    pub fn config(self) -> &'static DistortionConfig {
        match self {
            Self::Prism => &PRISM,
            Self::Fracture => &FRACTURE,
            Self::Aurora => &AURORA,
        }
    }
}

impl EffectMode for DistortionMode {
    const ALL: &'static [Self] = &[Self::Prism, Self::Fracture, Self::Aurora];

    fn key(self) -> &'static str {
        match self {
            Self::Prism => "prism",
            Self::Fracture => "fracture",
            Self::Aurora => "aurora",
        }
    }
}

impl_mode_traits!(DistortionMode);
