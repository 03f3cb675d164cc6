use crate::modes::EffectMode;

/// Synthetic, time-of-day driven presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtmosphereMode {
    /// Warm vertical gradient that brightens toward noon.
    Dawn,
    /// Desaturated blue with high-frequency flicker.
    Storm,
    /// Smooth green/violet drift.
    Aurora,
}

/// Static hue-drift parameters owned by each [`AtmosphereMode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereConfig {
    /// Center hue in degrees.
    pub base_hue: f64,
    /// Peak positional hue sway in degrees.
    pub hue_sway: f64,
    /// Hue shift in degrees across the seasonal cycle.
    pub seasonal_hue: f64,
    /// Mean saturation in `[0, 1]`.
    pub saturation: f64,
    /// Saturation oscillation amplitude.
    pub saturation_sway: f64,
    /// Mean lightness in `[0, 1]`.
    pub lightness: f64,
    /// Lightness oscillation amplitude.
    pub lightness_sway: f64,
}

const DAWN: AtmosphereConfig = AtmosphereConfig {
    base_hue: 18.0,
    hue_sway: 28.0,
    seasonal_hue: 12.0,
    saturation: 0.58,
    saturation_sway: 0.14,
    lightness: 0.36,
    lightness_sway: 0.22,
};

const STORM: AtmosphereConfig = AtmosphereConfig {
    base_hue: 212.0,
    hue_sway: 18.0,
    seasonal_hue: 6.0,
    saturation: 0.26,
    saturation_sway: 0.12,
    lightness: 0.22,
    lightness_sway: 0.10,
};

const AURORA: AtmosphereConfig = AtmosphereConfig {
    base_hue: 140.0,
    hue_sway: 60.0,
    seasonal_hue: 15.0,
    saturation: 0.62,
    saturation_sway: 0.18,
    lightness: 0.28,
    lightness_sway: 0.22,
};

impl AtmosphereMode {
    /// Borrow the preset's static configuration.
    pub fn config(self) -> &'static AtmosphereConfig {
        match self {
            Self::Dawn => &DAWN,
            Self::Storm => &STORM,
            Self::Aurora => &AURORA,
        }
    }
}

impl EffectMode for AtmosphereMode {
    const ALL: &'static [Self] = &[Self::Dawn, Self::Storm, Self::Aurora];

    fn key(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Storm => "storm",
            Self::Aurora => "aurora",
        }
    }
}

impl_mode_traits!(AtmosphereMode);
