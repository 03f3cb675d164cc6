use crate::foundation::error::{LucentError, LucentResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Weather-derived inputs to the atmosphere field. Every field is independently optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvFactor {
    /// Air temperature in °C.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// WMO weather interpretation code.
    #[serde(default, alias = "weathercode")]
    pub weather_code: Option<u32>,
    /// Wind speed in km/h.
    #[serde(default)]
    pub windspeed: Option<f64>,
}

/// Multipliers and offsets applied to the atmosphere field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvBias {
    /// Degrees added to hue.
    pub hue_shift: f64,
    /// Saturation multiplier.
    pub saturation_mul: f64,
    /// Lightness multiplier.
    pub lightness_mul: f64,
    /// Multiplier on the field's time axis.
    pub time_scale: f64,
}

impl EnvBias {
    /// The identity bias.
    pub const NEUTRAL: Self = Self {
        hue_shift: 0.0,
        saturation_mul: 1.0,
        lightness_mul: 1.0,
        time_scale: 1.0,
    };
}

#[derive(serde::Deserialize)]
struct OpenMeteoPayload {
    current_weather: EnvFactor,
}

impl EnvFactor {
    /// All fields absent.
    pub const UNKNOWN: Self = Self {
        temperature: None,
        weather_code: None,
        windspeed: None,
    };

    /// Parse a weather payload.
    ///
    /// Accepts either `{"current_weather": {...}}` or a flat object with the same keys.
    pub fn from_json(bytes: &[u8]) -> LucentResult<Self> {
        if let Ok(p) = serde_json::from_slice::<OpenMeteoPayload>(bytes) {
            return Ok(p.current_weather);
        }
        serde_json::from_slice::<EnvFactor>(bytes)
            .map_err(|e| LucentError::serde(format!("parse weather payload: {e}")))
    }

    /// Weather-code factor. Absent codes and codes 1..=3 are neutral (1.0).
    pub fn weather_factor(&self) -> f64 {
        match self.weather_code {
            None => 1.0,
            Some(0) => 1.1,
            Some(1..=3) => 1.0,
            Some(45 | 48) => 0.85,
            Some(51..=67) => 0.8,
            Some(71..=77) => 1.15,
            Some(80..=82) => 0.78,
            Some(95..=99) => 0.7,
            Some(_) => 1.0,
        }
    }

    /// Hue offset in degrees. Warm air pulls hue toward red; absent temperature is 0.
    pub fn temperature_bias(&self) -> f64 {
        match self.temperature {
            Some(t) if t.is_finite() => -((t - 15.0) / 25.0).clamp(-1.0, 1.0) * 20.0,
            _ => 0.0,
        }
    }

    /// Time-axis multiplier. Absent wind is 1.
    pub fn wind_bias(&self) -> f64 {
        match self.windspeed {
            Some(w) if w.is_finite() => 1.0 + (w / 60.0).clamp(0.0, 1.0) * 0.5,
            _ => 1.0,
        }
    }

    /// Fold the record into field multipliers.
    pub fn bias(&self) -> EnvBias {
        let wf = self.weather_factor();
        EnvBias {
            hue_shift: self.temperature_bias(),
            saturation_mul: wf,
            lightness_mul: 0.5 + 0.5 * wf,
            time_scale: self.wind_bias(),
        }
    }
}

/// Environmental record shared between the refresh task and the draw loop.
///
/// Writers replace the whole record under the lock, so readers always see a consistent
/// snapshot.
#[derive(Clone, Debug, Default)]
pub struct SharedEnv(Arc<RwLock<EnvFactor>>);

impl SharedEnv {
    /// Create a handle holding `initial`.
    pub fn new(initial: EnvFactor) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    /// Copy out the current record.
    pub fn snapshot(&self) -> EnvFactor {
        match self.0.read() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the current record.
    pub fn store(&self, value: EnvFactor) {
        match self.0.write() {
            Ok(mut g) => *g = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

/// Black-box source of environmental data (geolocation plus weather lookup).
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current record.
    fn fetch(&self) -> LucentResult<EnvFactor>;
}

/// Provider returning a fixed record.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedWeather(pub EnvFactor);

impl WeatherProvider for FixedWeather {
    fn fetch(&self) -> LucentResult<EnvFactor> {
        Ok(self.0)
    }
}

/// Provider reading a weather payload from disk on every fetch.
#[derive(Clone, Debug)]
pub struct FileWeather {
    path: PathBuf,
}

impl FileWeather {
    /// Read from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WeatherProvider for FileWeather {
    fn fetch(&self) -> LucentResult<EnvFactor> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            LucentError::validation(format!(
                "read weather payload '{}': {e}",
                self.path.display()
            ))
        })?;
        EnvFactor::from_json(&bytes)
    }
}

/// Fetch once and publish the result. Failures publish [`EnvFactor::UNKNOWN`] and are logged,
/// never returned.
#[tracing::instrument(skip_all)]
pub fn refresh_env_now<P>(provider: &P, env: &SharedEnv) -> EnvFactor
where
    P: WeatherProvider + ?Sized,
{
    let value = match provider.fetch() {
        Ok(v) => {
            tracing::debug!(?v, "environment refreshed");
            v
        }
        Err(e) => {
            tracing::warn!(error = %e, "environment unavailable; using neutral bias");
            EnvFactor::UNKNOWN
        }
    };
    env.store(value);
    value
}

/// Fire-and-forget refresh on the rayon pool. The draw loop never waits on it.
pub fn refresh_env<P>(provider: Arc<P>, env: SharedEnv)
where
    P: WeatherProvider + ?Sized + 'static,
{
    rayon::spawn(move || {
        refresh_env_now(provider.as_ref(), &env);
    });
}

#[cfg(test)]
#[path = "../../tests/unit/env/weather.rs"]
mod tests;
