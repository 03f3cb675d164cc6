//! Lucent renders animated per-frame pixel effects in software.
//!
//! Two pipelines share one architecture:
//!
//! - **Distortion**: a live camera frame is resampled through a displacement field, recolored
//!   per mode and posterized.
//! - **Atmosphere**: a color field is synthesized from wall-clock time and optional weather
//!   data, then smoothed against the previous frame.
//!
//! Either output is layered onto a presentation [`Surface`] by a [`Compositor`]. A
//! [`Session`] owns the lifecycle; an external scheduler calls [`Session::tick`] once per
//! refresh, or [`run_frames`] drives it offline into a [`FrameSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod color;
pub(crate) mod encode;
pub(crate) mod env;
pub(crate) mod field;
pub(crate) mod modes;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod source;
pub(crate) mod transform;

pub use crate::foundation::core::{Dims, FrameBuffer, FrameTime, Intensity};
pub use crate::foundation::error::{CameraError, LucentError, LucentResult};

pub use crate::color::hsl::Hsl;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, save_png};
pub use crate::env::weather::{
    EnvBias, EnvFactor, FileWeather, FixedWeather, SharedEnv, WeatherProvider, refresh_env,
    refresh_env_now,
};
pub use crate::field::atmosphere::{AtmosphereField, AtmosphereSample};
pub use crate::field::clock::WallClock;
pub use crate::field::distortion::DistortionField;
pub use crate::modes::EffectMode;
pub use crate::modes::atmosphere::{AtmosphereConfig, AtmosphereMode};
pub use crate::modes::distortion::{DistortionConfig, DistortionMode};
pub use crate::render::blend::{BlendMode, composite_over};
pub use crate::render::blur::blur_rgba8_premul;
pub use crate::render::compositor::{
    CLEAR_COLOR, CompositePlan, Compositor, DrawState, GradientStop, Pass, atmosphere_plan,
    distortion_plan,
};
pub use crate::render::filter::{Filter, apply_filters};
pub use crate::render::surface::Surface;
pub use crate::session::config::{SessionConfig, SourceConfig, Variant};
pub use crate::session::controls::Controls;
pub use crate::session::driver::{Session, SessionState, StartOutcome, TickDecision};
pub use crate::session::effect::{AtmosphereEffect, DistortionEffect, Effect};
pub use crate::session::layout::{presentation_dims, processing_dims};
pub use crate::session::runner::{RunStats, Timeline, run_frames};
pub use crate::source::camera::{
    CameraDevice, CameraOpts, CaptureConstraints, CaptureStream, FacingMode,
    acquire_with_fallback, open_camera, wait_for_first_frame,
};
pub use crate::source::still::{StillCamera, StillStream, test_pattern};
pub use crate::transform::atmosphere::{HISTORY_MIX, INTRA_FRAME_MIX, transform_atmosphere, vignette};
pub use crate::transform::distortion::{ToneParams, luminance, posterize, transform_distortion};
