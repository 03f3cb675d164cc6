use crate::foundation::core::{Dims, FrameBuffer, FrameTime};
use crate::foundation::error::{LucentError, LucentResult};
use crate::render::compositor::{CLEAR_COLOR, Compositor};
use crate::render::surface::Surface;
use crate::session::controls::Controls;
use crate::session::effect::Effect;
use crate::session::layout::presentation_dims;

/// Whether the tick loop is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing scheduled; buffers released.
    Idle,
    /// Ticks render frames.
    Running,
}

/// Result of [`Session::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// The session moved from idle to running; schedule the first tick.
    Started,
    /// The session was already running; nothing changed and nothing new must be scheduled.
    AlreadyRunning,
}

/// What the scheduler should do after a tick.
#[derive(Debug)]
pub enum TickDecision {
    /// Schedule the next tick.
    Continue,
    /// The session is idle; stop scheduling.
    Halt,
    /// The tick failed; the session is now idle and the error is reported.
    Failed(LucentError),
}

/// An effect session: the single owner of buffers, frame source and lifecycle state.
///
/// All mutation goes through [`Session::start`], [`Session::stop`], [`Session::resize`] and
/// [`Session::tick`]. The scheduler itself lives outside; it calls `tick` once per refresh for
/// as long as the returned decision is [`TickDecision::Continue`].
pub struct Session<E: Effect> {
    effect: E,
    state: SessionState,
    viewport_width: u32,
    presentation: Surface,
    output: Option<FrameBuffer>,
    compositor: Compositor,
    status: String,
    frames_drawn: u64,
}

impl<E: Effect> Session<E> {
    /// Idle session laid out for a viewport `viewport_width` pixels wide.
    pub fn new(effect: E, viewport_width: u32) -> Self {
        Self {
            effect,
            state: SessionState::Idle,
            viewport_width,
            presentation: Surface::new(presentation_dims(viewport_width)),
            output: None,
            compositor: Compositor::new(),
            status: "ready".to_owned(),
            frames_drawn: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Shorthand for `state() == Running`.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Latest human-readable status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Frames drawn since the session was created.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Borrow the effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Mutably borrow the effect.
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Presentation surface size.
    pub fn presentation_dims(&self) -> Dims {
        self.presentation.dims()
    }

    /// Offscreen buffer size while running.
    pub fn processing_dims(&self) -> Option<Dims> {
        self.output.as_ref().map(FrameBuffer::dims)
    }

    /// The presentation surface as a straight-alpha frame.
    pub fn presented(&self) -> FrameBuffer {
        self.presentation.to_frame()
    }

    /// Acquire the source, allocate buffers and enter `Running`.
    ///
    /// Calling this while running is a no-op reported as [`StartOutcome::AlreadyRunning`].
    /// On failure the session stays idle, the source is released and the error is also
    /// reflected in [`Session::status`].
    #[tracing::instrument(skip_all)]
    pub fn start(&mut self) -> LucentResult<StartOutcome> {
        if self.is_running() {
            tracing::debug!("start ignored; already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        if let Err(err) = self.effect.acquire() {
            self.effect.release();
            self.status = failure_message(&err);
            tracing::warn!(error = %err, "frame source acquisition failed");
            return Err(err);
        }

        self.allocate();
        self.state = SessionState::Running;
        self.status = "started".to_owned();
        tracing::info!(
            presentation = ?self.presentation.dims(),
            processing = ?self.processing_dims(),
            "session started"
        );
        Ok(StartOutcome::Started)
    }

    /// Release the source, clear the surface and enter `Idle`. No-op while idle.
    ///
    /// Returns whether a transition happened.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.halt();
        self.status = "stopped".to_owned();
        tracing::info!("session stopped");
        true
    }

    /// Apply a new layout width. While running, buffers are reallocated and history is reset.
    pub fn resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        if self.is_running() {
            self.allocate();
            tracing::debug!(
                presentation = ?self.presentation.dims(),
                processing = ?self.processing_dims(),
                "session resized"
            );
        }
    }

    /// Pull one frame through source, transform and compositor.
    ///
    /// Idle sessions return [`TickDecision::Halt`] without touching any buffer, so a tick that
    /// was already queued when `stop` ran does nothing.
    pub fn tick(&mut self, time: FrameTime, controls: &Controls<E::Mode>) -> TickDecision {
        if !self.is_running() {
            return TickDecision::Halt;
        }
        if !self.effect.is_ready() {
            self.status = "waiting for camera frame".to_owned();
            return TickDecision::Continue;
        }

        match self.draw(time, controls) {
            Ok(()) => {
                self.frames_drawn += 1;
                self.status = format!(
                    "running: {} / intensity {}%",
                    controls.mode,
                    controls.intensity.value()
                );
                TickDecision::Continue
            }
            Err(err) => {
                tracing::error!(error = %err, "tick failed; stopping session");
                self.halt();
                self.status = format!("render error: {}", detail(&err));
                TickDecision::Failed(err)
            }
        }
    }

    /// Report a mode or intensity change made while idle. Running sessions report through
    /// the next tick instead.
    pub fn note_controls_changed(&mut self, before: &Controls<E::Mode>, after: &Controls<E::Mode>) {
        if self.is_running() {
            return;
        }
        if before.mode != after.mode {
            self.status = format!("mode changed: {}", after.mode);
        } else if before.intensity != after.intensity {
            self.status = format!("intensity changed: {}%", after.intensity.value());
        }
    }

    fn draw(&mut self, time: FrameTime, controls: &Controls<E::Mode>) -> LucentResult<()> {
        let output = match self.output.as_mut() {
            Some(output) => output,
            None => return Err(LucentError::render("offscreen buffer is not allocated")),
        };
        self.effect.render(time, controls, output)?;
        let plan = self.effect.plan(time, controls);
        self.compositor.execute(&plan, output, &mut self.presentation)
    }

    fn allocate(&mut self) {
        let presentation = presentation_dims(self.viewport_width);
        let processing = self.effect.processing_dims(presentation);
        self.presentation.reallocate(presentation);
        self.output = Some(FrameBuffer::new(processing));
        self.effect.reset(Some(processing));
    }

    fn halt(&mut self) {
        self.effect.release();
        self.effect.reset(None);
        self.output = None;
        self.presentation.clear(CLEAR_COLOR);
        self.state = SessionState::Idle;
    }
}

fn detail(err: &LucentError) -> String {
    match err {
        LucentError::Render(msg) => msg.clone(),
        other => other.to_string(),
    }
}

fn failure_message(err: &LucentError) -> String {
    match err {
        LucentError::Camera(cam) => cam.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
