use crate::foundation::core::{Dims, FrameBuffer};
use crate::foundation::error::{CameraError, LucentError, LucentResult};
use crate::source::camera::{CameraDevice, CaptureConstraints, CaptureStream};
use std::collections::VecDeque;
use std::path::Path;

/// Camera stand-in that serves one fixed frame.
///
/// Used for offline rendering and tests. Builder methods script the failure cases a real
/// device can produce.
#[derive(Clone, Debug)]
pub struct StillCamera {
    frame: FrameBuffer,
    open_failures: VecDeque<CameraError>,
    video_tracks: usize,
    warmup_polls: u32,
    fail_after_reads: Option<u32>,
    attempts: Vec<CaptureConstraints>,
}

impl StillCamera {
    /// Serve `frame` on every read.
    pub fn new(frame: FrameBuffer) -> Self {
        Self {
            frame,
            open_failures: VecDeque::new(),
            video_tracks: 1,
            warmup_polls: 0,
            fail_after_reads: None,
            attempts: Vec::new(),
        }
    }

    /// Serve a decoded image file.
    pub fn from_image_path(path: impl AsRef<Path>) -> LucentResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| anyhow::anyhow!("open image '{}': {e}", path.display()))?
            .to_rgba8();
        Ok(Self::new(FrameBuffer::from_image(img)?))
    }

    /// Serve a generated test pattern.
    pub fn test_pattern(dims: Dims) -> Self {
        Self::new(test_pattern(dims))
    }

    /// Fail the next opens with `errors`, in order, before succeeding.
    pub fn with_open_failures(mut self, errors: impl IntoIterator<Item = CameraError>) -> Self {
        self.open_failures.extend(errors);
        self
    }

    /// Open streams that carry no video track.
    pub fn without_video_track(mut self) -> Self {
        self.video_tracks = 0;
        self
    }

    /// Report no frame size for the first `polls` size queries on each stream.
    pub fn with_warmup(mut self, polls: u32) -> Self {
        self.warmup_polls = polls;
        self
    }

    /// Fail every read after `reads` successful ones.
    pub fn failing_after(mut self, reads: u32) -> Self {
        self.fail_after_reads = Some(reads);
        self
    }

    /// Constraints passed to every `open` call so far.
    pub fn attempts(&self) -> &[CaptureConstraints] {
        &self.attempts
    }
}

impl CameraDevice for StillCamera {
    type Stream = StillStream;

    fn open(&mut self, constraints: &CaptureConstraints) -> Result<StillStream, CameraError> {
        self.attempts.push(*constraints);
        if let Some(err) = self.open_failures.pop_front() {
            return Err(err);
        }
        Ok(StillStream {
            frame: self.frame.clone(),
            video_tracks: self.video_tracks,
            warmup_polls: self.warmup_polls,
            reads_left: self.fail_after_reads,
            live: true,
        })
    }
}

/// Stream opened from a [`StillCamera`].
#[derive(Clone, Debug)]
pub struct StillStream {
    frame: FrameBuffer,
    video_tracks: usize,
    warmup_polls: u32,
    reads_left: Option<u32>,
    live: bool,
}

impl StillStream {
    /// Whether [`CaptureStream::stop`] has not been called yet.
    pub fn is_live(&self) -> bool {
        self.live
    }
}

impl CaptureStream for StillStream {
    fn video_track_count(&self) -> usize {
        self.video_tracks
    }

    fn dims(&mut self) -> Option<Dims> {
        if !self.live {
            return None;
        }
        if self.warmup_polls > 0 {
            self.warmup_polls -= 1;
            return None;
        }
        Some(self.frame.dims())
    }

    fn read_frame(&mut self, dst: &mut FrameBuffer) -> LucentResult<()> {
        if !self.live {
            return Err(CameraError::Other("stream is stopped".to_owned()).into());
        }
        if let Some(left) = self.reads_left.as_mut() {
            if *left == 0 {
                return Err(LucentError::render("camera stopped delivering frames"));
            }
            *left -= 1;
        }
        dst.copy_from(&self.frame.resized(dst.dims())?)
    }

    fn stop(&mut self) {
        self.live = false;
    }
}

/// Diagonal color ramp with a checker overlay; exercises every displacement direction.
pub fn test_pattern(dims: Dims) -> FrameBuffer {
    let mut out = FrameBuffer::new(dims);
    let (w, h) = (dims.width.max(1), dims.height.max(1));
    for y in 0..dims.height {
        for x in 0..dims.width {
            let r = (x * 255 / w) as u8;
            let g = (y * 255 / h) as u8;
            let b = if ((x / 16) + (y / 16)) % 2 == 0 { 200 } else { 40 };
            out.set_pixel(x, y, [r, g, b, 255]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/still.rs"]
mod tests;
