use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameTime;
use crate::foundation::error::{LucentError, LucentResult};
use crate::session::controls::Controls;
use crate::session::driver::{Session, TickDecision};
use crate::session::effect::Effect;

/// Fixed-rate schedule standing in for a display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    /// Ticks per second.
    pub fps: u32,
    /// Number of ticks to run.
    pub frames: u64,
    /// Wall clock at tick 0, Unix milliseconds.
    pub start_unix_ms: i64,
}

impl Timeline {
    /// Timing inputs for tick `idx`.
    pub fn frame_time(&self, idx: u64) -> FrameTime {
        let elapsed_ms = idx as f64 * 1000.0 / f64::from(self.fps.max(1));
        FrameTime {
            elapsed_ms,
            wall_unix_ms: self.start_unix_ms.saturating_add(elapsed_ms.round() as i64),
        }
    }
}

/// Counters from [`run_frames`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Frames drawn and pushed to the sink.
    pub frames_pushed: u64,
    /// Ticks spent waiting for the source.
    pub waiting_ticks: u64,
}

/// Drive `session` through `timeline`, pushing every drawn frame into `sink`.
///
/// Starts the session if it is idle and stops it afterwards, on every exit path. A failed tick
/// or sink call ends the sink (when it was begun) and returns the error; a halt ends the run early.
pub fn run_frames<E: Effect>(
    session: &mut Session<E>,
    controls: &Controls<E::Mode>,
    timeline: &Timeline,
    sink: &mut dyn FrameSink,
) -> LucentResult<RunStats> {
    if timeline.fps == 0 {
        return Err(LucentError::validation("timeline fps must be > 0"));
    }
    session.start()?;
    let result = drive(session, controls, timeline, sink);
    session.stop();
    if let Ok(stats) = &result {
        tracing::info!(?stats, "run finished");
    }
    result
}

fn drive<E: Effect>(
    session: &mut Session<E>,
    controls: &Controls<E::Mode>,
    timeline: &Timeline,
    sink: &mut dyn FrameSink,
) -> LucentResult<RunStats> {
    sink.begin(SinkConfig {
        dims: session.presentation_dims(),
        fps: timeline.fps,
    })?;

    let mut stats = RunStats::default();
    let looped = run_ticks(session, controls, timeline, sink, &mut stats);
    let ended = sink.end();
    looped?;
    ended?;
    Ok(stats)
}

fn run_ticks<E: Effect>(
    session: &mut Session<E>,
    controls: &Controls<E::Mode>,
    timeline: &Timeline,
    sink: &mut dyn FrameSink,
    stats: &mut RunStats,
) -> LucentResult<()> {
    for idx in 0..timeline.frames {
        let drawn_before = session.frames_drawn();
        stats.ticks += 1;
        match session.tick(timeline.frame_time(idx), controls) {
            TickDecision::Continue if session.frames_drawn() > drawn_before => {
                sink.push_frame(idx, &session.presented())?;
                stats.frames_pushed += 1;
            }
            TickDecision::Continue => stats.waiting_ticks += 1,
            TickDecision::Halt => break,
            TickDecision::Failed(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/runner.rs"]
mod tests;
