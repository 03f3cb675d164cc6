use crate::foundation::core::{Dims, FrameBuffer};
use crate::foundation::error::{LucentError, LucentResult};
use std::path::{Path, PathBuf};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame size in pixels.
    pub dims: Dims,
    /// Nominal frames per second.
    pub fps: u32,
}

/// Consumer of presented frames.
///
/// `push_frame` is called with strictly increasing indices between `begin` and `end`.
pub trait FrameSink {
    /// Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> LucentResult<()>;
    /// Push one presented frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameBuffer) -> LucentResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> LucentResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameBuffer)>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameBuffer)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LucentResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameBuffer) -> LucentResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> LucentResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every frame as `<prefix><idx:05>.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path for frame `idx`.
    pub fn path_for(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("{}{idx:05}.png", self.prefix))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> LucentResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            anyhow::anyhow!("create output dir '{}': {e}", self.dir.display())
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameBuffer) -> LucentResult<()> {
        let path = self.path_for(idx);
        save_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> LucentResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode one frame as RGBA8 PNG.
pub fn save_png(path: &Path, frame: &FrameBuffer) -> LucentResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("create output dir '{}': {e}", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| LucentError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
