use crate::env::weather::{EnvFactor, SharedEnv, WeatherProvider, refresh_env};
use crate::field::atmosphere::AtmosphereField;
use crate::foundation::core::{Dims, FrameBuffer, FrameTime};
use crate::foundation::error::{LucentError, LucentResult};
use crate::modes::EffectMode;
use crate::modes::atmosphere::AtmosphereMode;
use crate::modes::distortion::DistortionMode;
use crate::render::compositor::{CompositePlan, atmosphere_plan, distortion_plan};
use crate::session::controls::Controls;
use crate::session::layout::processing_dims;
use crate::source::camera::{CameraDevice, CameraOpts, CaptureStream, open_camera};
use crate::transform::atmosphere::transform_atmosphere;
use crate::transform::distortion::transform_distortion;
use std::sync::Arc;

/// One effect pipeline: frame source, field function and per-pixel transform.
///
/// A [`crate::Session`] drives the lifecycle; implementations only own their source and any
/// history they need between ticks.
pub trait Effect {
    /// Preset type selected by the user.
    type Mode: EffectMode;

    /// Acquire and validate the frame source. Called once per start.
    fn acquire(&mut self) -> LucentResult<()>;

    /// Release the frame source. Safe to call when nothing is held.
    fn release(&mut self);

    /// Whether the source can deliver a frame this tick.
    fn is_ready(&mut self) -> bool;

    /// Offscreen buffer size for a presentation surface of `presentation`.
    fn processing_dims(&mut self, presentation: Dims) -> Dims;

    /// Drop transient state and, when `dims` is given, reallocate it at that size.
    fn reset(&mut self, dims: Option<Dims>);

    /// Render one frame into `output`.
    fn render(
        &mut self,
        time: FrameTime,
        controls: &Controls<Self::Mode>,
        output: &mut FrameBuffer,
    ) -> LucentResult<()>;

    /// Composite passes for this frame.
    fn plan(&self, time: FrameTime, controls: &Controls<Self::Mode>) -> CompositePlan;
}

/// Live-camera effect: displacement sampling, color effects and posterization.
pub struct DistortionEffect<D: CameraDevice> {
    device: D,
    opts: CameraOpts,
    stream: Option<D::Stream>,
    source: Option<FrameBuffer>,
}

impl<D: CameraDevice> DistortionEffect<D> {
    /// Effect reading from `device` with default acquisition settings.
    pub fn new(device: D) -> Self {
        Self::with_opts(device, CameraOpts::default())
    }

    /// Effect with explicit acquisition settings.
    pub fn with_opts(device: D, opts: CameraOpts) -> Self {
        Self {
            device,
            opts,
            stream: None,
            source: None,
        }
    }

    /// Borrow the capture device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Whether a stream is currently held.
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }
}

impl<D: CameraDevice> Effect for DistortionEffect<D> {
    type Mode = DistortionMode;

    fn acquire(&mut self) -> LucentResult<()> {
        self.release();
        let stream = open_camera(&mut self.device, &self.opts)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        self.source = None;
    }

    fn is_ready(&mut self) -> bool {
        self.stream
            .as_mut()
            .is_some_and(|stream| stream.dims().is_some())
    }

    fn processing_dims(&mut self, _presentation: Dims) -> Dims {
        processing_dims(self.stream.as_mut().and_then(|stream| stream.dims()))
    }

    fn reset(&mut self, dims: Option<Dims>) {
        self.source = dims.map(FrameBuffer::new);
    }

    fn render(
        &mut self,
        time: FrameTime,
        controls: &Controls<DistortionMode>,
        output: &mut FrameBuffer,
    ) -> LucentResult<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| LucentError::render("camera stream is not available"))?;
        let source = self.source.get_or_insert_with(|| FrameBuffer::new(output.dims()));
        if source.dims() != output.dims() {
            *source = FrameBuffer::new(output.dims());
        }
        stream.read_frame(source)?;
        transform_distortion(
            source,
            output,
            controls.mode,
            controls.intensity,
            time.elapsed_ms,
        )
    }

    fn plan(&self, time: FrameTime, controls: &Controls<DistortionMode>) -> CompositePlan {
        distortion_plan(controls.mode, controls.intensity, time.elapsed_ms)
    }
}

/// Synthetic effect generated from wall-clock time and the shared environment record.
pub struct AtmosphereEffect {
    env: SharedEnv,
    provider: Option<Arc<dyn WeatherProvider>>,
    utc_offset_minutes: i32,
    previous: Option<FrameBuffer>,
}

impl AtmosphereEffect {
    /// Effect reading `env`; no refresh is scheduled.
    pub fn new(env: SharedEnv) -> Self {
        Self {
            env,
            provider: None,
            utc_offset_minutes: 0,
            previous: None,
        }
    }

    /// Refresh `env` from `provider` in the background on every start.
    pub fn with_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Local time offset used for time-of-day terms.
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Handle to the shared environment record.
    pub fn env(&self) -> &SharedEnv {
        &self.env
    }

    /// The previous-frame buffer, if allocated.
    pub fn previous(&self) -> Option<&FrameBuffer> {
        self.previous.as_ref()
    }
}

impl Effect for AtmosphereEffect {
    type Mode = AtmosphereMode;

    fn acquire(&mut self) -> LucentResult<()> {
        if let Some(provider) = &self.provider {
            refresh_env(Arc::clone(provider), self.env.clone());
        }
        Ok(())
    }

    fn release(&mut self) {}

    fn is_ready(&mut self) -> bool {
        true
    }

    fn processing_dims(&mut self, presentation: Dims) -> Dims {
        processing_dims(Some(presentation))
    }

    fn reset(&mut self, dims: Option<Dims>) {
        self.previous = dims.map(FrameBuffer::new);
    }

    fn render(
        &mut self,
        time: FrameTime,
        controls: &Controls<AtmosphereMode>,
        output: &mut FrameBuffer,
    ) -> LucentResult<()> {
        let env: EnvFactor = self.env.snapshot();
        let field = AtmosphereField::new(
            controls.mode,
            controls.intensity.factor(),
            time,
            self.utc_offset_minutes,
            &env,
            output.dims(),
        );
        let previous = self.previous.get_or_insert_with(|| FrameBuffer::new(output.dims()));
        if previous.dims() != output.dims() {
            *previous = FrameBuffer::new(output.dims());
        }
        transform_atmosphere(&field, output, previous)
    }

    fn plan(&self, _time: FrameTime, controls: &Controls<AtmosphereMode>) -> CompositePlan {
        atmosphere_plan(controls.intensity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/effect.rs"]
mod tests;
