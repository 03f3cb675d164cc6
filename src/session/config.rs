use crate::env::weather::{FileWeather, WeatherProvider};
use crate::foundation::core::{Dims, Intensity};
use crate::foundation::error::{LucentError, LucentResult};
use crate::modes::EffectMode;
use crate::modes::atmosphere::AtmosphereMode;
use crate::modes::distortion::DistortionMode;
use crate::session::controls::Controls;
use crate::session::runner::Timeline;
use crate::source::camera::CameraOpts;
use crate::source::still::StillCamera;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Which pipeline a session runs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Camera-driven displacement and posterization.
    #[default]
    Distortion,
    /// Time- and weather-driven synthetic color field.
    Atmosphere,
}

impl Variant {
    /// Mode keys accepted by this variant, in menu order.
    pub fn mode_keys(self) -> Vec<&'static str> {
        match self {
            Self::Distortion => DistortionMode::ALL.iter().map(|m| m.key()).collect(),
            Self::Atmosphere => AtmosphereMode::ALL.iter().map(|m| m.key()).collect(),
        }
    }
}

/// Frame source for offline sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// Generated ramp-and-checker frame.
    #[default]
    TestPattern,
    /// A still image decoded from disk.
    Image(PathBuf),
}

/// Session settings loaded from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Pipeline to run.
    pub variant: Variant,
    /// Mode key for the variant.
    pub mode: String,
    /// Effect strength, `0..=100`.
    pub intensity: u32,
    /// Layout width the presentation surface is sized from.
    pub viewport_width: u32,
    /// Ticks per second.
    pub fps: u32,
    /// Number of ticks to run.
    pub frames: u64,
    /// Camera stand-in for the distortion variant.
    pub source: SourceConfig,
    /// Optional weather payload for the atmosphere variant.
    pub weather: Option<PathBuf>,
    /// Wall clock at tick 0; the current time when absent.
    pub start_unix_ms: Option<i64>,
    /// Local time offset for time-of-day terms.
    pub utc_offset_minutes: i32,
    /// Longest wait for the first camera frame.
    pub first_frame_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Distortion,
            mode: "prism".to_owned(),
            intensity: 50,
            viewport_width: 960,
            fps: 30,
            frames: 1,
            source: SourceConfig::TestPattern,
            weather: None,
            start_unix_ms: None,
            utc_offset_minutes: 0,
            first_frame_timeout_ms: 2500,
        }
    }
}

impl SessionConfig {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LucentResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LucentError::serde(format!("parse session config JSON: {e}")))
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LucentResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LucentError::validation(format!("open session config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the mode key against the variant and every numeric range.
    pub fn validate(&self) -> LucentResult<()> {
        Intensity::new(self.intensity)?;
        if self.fps == 0 {
            return Err(LucentError::validation("fps must be > 0"));
        }
        match self.variant {
            Variant::Distortion => DistortionMode::from_key(&self.mode).map(drop),
            Variant::Atmosphere => AtmosphereMode::from_key(&self.mode).map(drop),
        }
    }

    /// Controls for the distortion variant.
    pub fn distortion_controls(&self) -> LucentResult<Controls<DistortionMode>> {
        Controls::parse(&self.mode, self.intensity)
    }

    /// Controls for the atmosphere variant.
    pub fn atmosphere_controls(&self) -> LucentResult<Controls<AtmosphereMode>> {
        Controls::parse(&self.mode, self.intensity)
    }

    /// Schedule for an offline run; `now_unix_ms` fills a missing start time.
    pub fn timeline(&self, now_unix_ms: i64) -> Timeline {
        Timeline {
            fps: self.fps,
            frames: self.frames,
            start_unix_ms: self.start_unix_ms.unwrap_or(now_unix_ms),
        }
    }

    /// Camera acquisition settings.
    pub fn camera_opts(&self) -> CameraOpts {
        CameraOpts {
            first_frame_timeout: Duration::from_millis(self.first_frame_timeout_ms),
            ..CameraOpts::default()
        }
    }

    /// Build the configured camera stand-in.
    pub fn camera(&self) -> LucentResult<StillCamera> {
        match &self.source {
            SourceConfig::TestPattern => Ok(StillCamera::test_pattern(Dims {
                width: 640,
                height: 360,
            })),
            SourceConfig::Image(path) => StillCamera::from_image_path(path),
        }
    }

    /// Weather provider, if a payload path is configured.
    pub fn weather_provider(&self) -> Option<Arc<dyn WeatherProvider>> {
        self.weather
            .as_ref()
            .map(|p| Arc::new(FileWeather::new(p)) as Arc<dyn WeatherProvider>)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
