use crate::foundation::core::{Dims, FrameBuffer};
use crate::foundation::error::{CameraError, LucentResult};
use std::time::{Duration, Instant};

/// Preferred camera direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front-facing.
    User,
    /// Rear-facing.
    Environment,
}

/// One entry of the capture fallback ladder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptureConstraints {
    /// Requested facing, if any.
    pub facing: Option<FacingMode>,
    /// Ideal capture size, if any.
    pub ideal: Option<Dims>,
}

impl CaptureConstraints {
    /// Accept whatever the device offers.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Front-facing request at an ideal size.
    pub fn user_facing(width: u32, height: u32) -> Self {
        Self {
            facing: Some(FacingMode::User),
            ideal: Some(Dims { width, height }),
        }
    }

    /// Descending preference: 1280x720, 960x540, then unconstrained.
    pub fn ladder() -> Vec<Self> {
        vec![
            Self::user_facing(1280, 720),
            Self::user_facing(960, 540),
            Self::unconstrained(),
        ]
    }
}

/// A live capture stream handed out by a [`CameraDevice`].
pub trait CaptureStream: Send {
    /// Number of video tracks; a usable stream has at least one.
    fn video_track_count(&self) -> usize;

    /// Native frame size once the first frame has arrived, `None` before that.
    ///
    /// Polling may advance device state, hence `&mut self`.
    fn dims(&mut self) -> Option<Dims>;

    /// Draw the current frame into `dst`, scaled to `dst`'s size.
    fn read_frame(&mut self, dst: &mut FrameBuffer) -> LucentResult<()>;

    /// Stop every track. Further reads fail.
    fn stop(&mut self);
}

/// A capture device that can open streams under constraints.
pub trait CameraDevice: Send {
    /// Stream type produced by [`CameraDevice::open`].
    type Stream: CaptureStream;

    /// Try to open a stream satisfying `constraints`.
    fn open(&mut self, constraints: &CaptureConstraints) -> Result<Self::Stream, CameraError>;
}

/// Camera acquisition settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraOpts {
    /// Constraints tried in order.
    pub ladder: Vec<CaptureConstraints>,
    /// Longest wait for the first frame before rendering starts anyway.
    pub first_frame_timeout: Duration,
    /// Sleep between first-frame polls.
    pub poll_interval: Duration,
}

impl Default for CameraOpts {
    fn default() -> Self {
        Self {
            ladder: CaptureConstraints::ladder(),
            first_frame_timeout: Duration::from_millis(2500),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Walk `ladder` until a stream opens.
///
/// A permission denial aborts immediately; any other failure moves on to the next entry and
/// the last one is reported if every entry fails.
pub fn acquire_with_fallback<D: CameraDevice>(
    device: &mut D,
    ladder: &[CaptureConstraints],
) -> Result<D::Stream, CameraError> {
    let mut last_err = None;
    for constraints in ladder {
        match device.open(constraints) {
            Ok(stream) => return Ok(stream),
            Err(err) if err.is_permission_denied() => return Err(err),
            Err(err) => {
                tracing::warn!(?constraints, %err, "camera constraints rejected; trying next");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| CameraError::Other("no capture constraints to try".to_owned())))
}

/// Poll until the stream reports a frame size or `timeout` elapses.
///
/// Returns whether a frame arrived. Timing out is not an error.
pub fn wait_for_first_frame<S: CaptureStream>(
    stream: &mut S,
    timeout: Duration,
    poll: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if stream.dims().is_some() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            tracing::debug!(?timeout, "no camera frame before timeout; continuing");
            return false;
        }
        std::thread::sleep(poll.min(deadline - now));
    }
}

/// Acquire a stream, check it carries video, and wait for its first frame.
pub fn open_camera<D: CameraDevice>(device: &mut D, opts: &CameraOpts) -> Result<D::Stream, CameraError> {
    let mut stream = acquire_with_fallback(device, &opts.ladder)?;
    if stream.video_track_count() == 0 {
        stream.stop();
        return Err(CameraError::NoVideoTrack);
    }
    wait_for_first_frame(&mut stream, opts.first_frame_timeout, opts.poll_interval);
    Ok(stream)
}

#[cfg(test)]
#[path = "../../tests/unit/source/camera.rs"]
mod tests;
