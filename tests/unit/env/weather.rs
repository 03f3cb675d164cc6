use super::*;
use std::time::{Duration, Instant};

struct FailingWeather;

impl WeatherProvider for FailingWeather {
    fn fetch(&self) -> LucentResult<EnvFactor> {
        Err(LucentError::validation("geolocation denied"))
    }
}

#[test]
fn absent_fields_bias_neutral() {
    assert_eq!(EnvFactor::UNKNOWN.bias(), EnvBias::NEUTRAL);
    assert_eq!(EnvFactor::default(), EnvFactor::UNKNOWN);
}

#[test]
fn documented_neutral_defaults_match_absent_record() {
    let explicit = EnvFactor {
        temperature: None,
        weather_code: Some(1),
        windspeed: None,
    };
    assert_eq!(explicit.weather_factor(), 1.0);
    assert_eq!(explicit.wind_bias(), 1.0);
    assert_eq!(explicit.temperature_bias(), 0.0);
    assert_eq!(explicit.bias(), EnvFactor::UNKNOWN.bias());
}

#[test]
fn biases_follow_conditions() {
    let hot = EnvFactor {
        temperature: Some(40.0),
        ..EnvFactor::UNKNOWN
    };
    assert_eq!(hot.temperature_bias(), -20.0);

    let cold = EnvFactor {
        temperature: Some(-100.0),
        ..EnvFactor::UNKNOWN
    };
    assert_eq!(cold.temperature_bias(), 20.0);

    let gale = EnvFactor {
        windspeed: Some(500.0),
        ..EnvFactor::UNKNOWN
    };
    assert_eq!(gale.wind_bias(), 1.5);

    let thunder = EnvFactor {
        weather_code: Some(95),
        ..EnvFactor::UNKNOWN
    };
    let b = thunder.bias();
    assert_eq!(b.saturation_mul, 0.7);
    assert!((b.lightness_mul - 0.85).abs() < 1e-12);
}

#[test]
fn parses_open_meteo_and_flat_payloads() {
    let nested = br#"{"latitude":35.0,"current_weather":{"temperature":21.5,"weathercode":3,"windspeed":12.0}}"#;
    let v = EnvFactor::from_json(nested).unwrap();
    assert_eq!(v.temperature, Some(21.5));
    assert_eq!(v.weather_code, Some(3));
    assert_eq!(v.windspeed, Some(12.0));

    let flat = br#"{"temperature":null,"weathercode":61}"#;
    let v = EnvFactor::from_json(flat).unwrap();
    assert_eq!(v.temperature, None);
    assert_eq!(v.weather_code, Some(61));
    assert_eq!(v.windspeed, None);

    assert!(EnvFactor::from_json(b"not json").is_err());
}

#[test]
fn failed_refresh_degrades_to_unknown() {
    let env = SharedEnv::new(EnvFactor {
        temperature: Some(10.0),
        ..EnvFactor::UNKNOWN
    });
    let got = refresh_env_now(&FailingWeather, &env);
    assert_eq!(got, EnvFactor::UNKNOWN);
    assert_eq!(env.snapshot(), EnvFactor::UNKNOWN);
}

#[test]
fn missing_file_degrades_to_unknown() {
    let env = SharedEnv::default();
    let provider = FileWeather::new("target/definitely/missing/weather.json");
    assert_eq!(refresh_env_now(&provider, &env), EnvFactor::UNKNOWN);
}

#[test]
fn background_refresh_publishes_whole_record() {
    let want = EnvFactor {
        temperature: Some(5.0),
        weather_code: Some(71),
        windspeed: Some(30.0),
    };
    let env = SharedEnv::default();
    refresh_env(Arc::new(FixedWeather(want)), env.clone());

    let deadline = Instant::now() + Duration::from_secs(5);
    while env.snapshot() != want {
        assert!(Instant::now() < deadline, "refresh never landed");
        std::thread::sleep(Duration::from_millis(2));
    }
}
