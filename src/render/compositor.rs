use crate::foundation::core::{FrameBuffer, Intensity};
use crate::foundation::error::LucentResult;
use crate::modes::distortion::DistortionMode;
use crate::render::blend::{BlendMode, composite_over};
use crate::render::filter::{Filter, apply_filters};
use crate::render::surface::{Surface, premul_rgba8};
use kurbo::{Point, Vec2};

/// Color the presentation surface is cleared to at the start of every frame.
pub const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Per-pass draw state: blend mode, global alpha and filter chain.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// Blend mode for the layer.
    pub blend: BlendMode,
    /// Global alpha in `[0, 1]`.
    pub opacity: f32,
    /// Filters applied to the layer before blending.
    pub filters: Vec<Filter>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            blend: BlendMode::Normal,
            opacity: 1.0,
            filters: Vec::new(),
        }
    }
}

/// One gradient color stop; `alpha` is straight alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis in `[0, 1]`.
    pub offset: f32,
    /// Stop color.
    pub rgb: [u8; 3],
    /// Stop alpha.
    pub alpha: f32,
}

/// One composite pass onto the presentation surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Pass {
    /// Overwrite every pixel with a straight-alpha color.
    Clear {
        /// Clear color.
        rgba: [u8; 4],
    },
    /// Draw the offscreen frame scaled to the surface, shifted by `offset` surface pixels.
    Draw {
        /// Translation in surface pixels.
        offset: Vec2,
        /// Pass state.
        state: DrawState,
    },
    /// Fill the whole surface with one color.
    Fill {
        /// Fill color.
        rgb: [u8; 3],
        /// Fill color alpha, applied before the pass opacity.
        alpha: f32,
        /// Pass state.
        state: DrawState,
    },
    /// Fill the whole surface with a linear gradient.
    LinearGradient {
        /// Axis start in surface-normalized coordinates.
        start: Point,
        /// Axis end in surface-normalized coordinates.
        end: Point,
        /// Color stops in ascending offset order.
        stops: Vec<GradientStop>,
        /// Pass state.
        state: DrawState,
    },
}

/// Ordered pass list for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompositePlan {
    /// Passes in execution order.
    pub passes: Vec<Pass>,
}

/// Composite plan for the camera distortion effect.
pub fn distortion_plan(mode: DistortionMode, intensity: Intensity, time_ms: f64) -> CompositePlan {
    let level = intensity.value() as f32;
    let wobble = intensity.factor();
    let shift = Vec2::new(
        (time_ms * 0.001).sin() * 7.0 * wobble,
        (time_ms * 0.0014).cos() * 6.0 * wobble,
    );
    const WHITE: [u8; 3] = [255, 255, 255];

    CompositePlan {
        passes: vec![
            Pass::Clear { rgba: CLEAR_COLOR },
            Pass::Draw {
                offset: Vec2::ZERO,
                state: DrawState {
                    filters: vec![
                        Filter::Saturate((120.0 + level) / 100.0),
                        Filter::Contrast((110.0 + level * 0.4) / 100.0),
                    ],
                    ..DrawState::default()
                },
            },
            Pass::Draw {
                offset: shift,
                state: DrawState {
                    blend: BlendMode::Screen,
                    opacity: 0.28,
                    filters: vec![Filter::Blur(1.0 + level / 60.0)],
                },
            },
            Pass::Fill {
                rgb: mode.config().tint,
                alpha: 0.35 + level / 300.0,
                state: DrawState {
                    blend: BlendMode::Color,
                    opacity: 0.18,
                    filters: Vec::new(),
                },
            },
            Pass::LinearGradient {
                start: Point::ZERO,
                end: Point::new(1.0, 1.0),
                stops: vec![
                    GradientStop { offset: 0.0, rgb: WHITE, alpha: 0.05 },
                    GradientStop { offset: 0.5, rgb: WHITE, alpha: 0.0 },
                    GradientStop { offset: 1.0, rgb: WHITE, alpha: 0.08 },
                ],
                state: DrawState::default(),
            },
        ],
    }
}

/// Composite plan for the synthetic atmosphere effect.
pub fn atmosphere_plan(intensity: Intensity) -> CompositePlan {
    let f = intensity.factor() as f32;
    CompositePlan {
        passes: vec![
            Pass::Clear { rgba: CLEAR_COLOR },
            Pass::Draw {
                offset: Vec2::ZERO,
                state: DrawState {
                    filters: vec![Filter::Brightness(0.85 + 0.3 * f)],
                    ..DrawState::default()
                },
            },
        ],
    }
}

/// Executes [`CompositePlan`]s onto a presentation [`Surface`].
#[derive(Debug, Default)]
pub struct Compositor {
    state: DrawState,
}

impl Compositor {
    /// New compositor with neutral draw state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw state currently in effect. Neutral between passes.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Run every pass of `plan`, drawing `frame` wherever a pass draws the offscreen buffer.
    pub fn execute(
        &mut self,
        plan: &CompositePlan,
        frame: &FrameBuffer,
        target: &mut Surface,
    ) -> LucentResult<()> {
        let mut scaled: Option<Surface> = None;
        for pass in &plan.passes {
            self.state = DrawState::default();
            let result = self.run_pass(pass, frame, target, &mut scaled);
            self.state = DrawState::default();
            result?;
        }
        Ok(())
    }

    fn run_pass(
        &mut self,
        pass: &Pass,
        frame: &FrameBuffer,
        target: &mut Surface,
        scaled: &mut Option<Surface>,
    ) -> LucentResult<()> {
        let dims = target.dims();
        match pass {
            Pass::Clear { rgba } => {
                target.clear(*rgba);
                Ok(())
            }
            Pass::Draw { offset, state } => {
                self.state = state.clone();
                let src = match scaled.take() {
                    Some(src) => src,
                    None => Surface::from_frame(&frame.resized(dims)?),
                };
                let layer = shifted(&src, *offset);
                *scaled = Some(src);
                self.blit(layer, target)
            }
            Pass::Fill { rgb, alpha, state } => {
                self.state = state.clone();
                let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                let px = premul_rgba8([rgb[0], rgb[1], rgb[2], a]);
                self.blit(px.repeat(dims.pixel_count()), target)
            }
            Pass::LinearGradient {
                start,
                end,
                stops,
                state,
            } => {
                self.state = state.clone();
                match gradient_layer(target, *start, *end, stops) {
                    Some(layer) => self.blit(layer, target),
                    None => Ok(()),
                }
            }
        }
    }

    fn blit(&self, mut layer: Vec<u8>, target: &mut Surface) -> LucentResult<()> {
        apply_filters(&mut layer, target.dims(), &self.state.filters)?;
        composite_over(
            target.as_bytes_mut(),
            &layer,
            self.state.opacity,
            self.state.blend,
        )
    }
}

/// Copy of `src` translated by `offset` (rounded to whole pixels); uncovered pixels are transparent.
fn shifted(src: &Surface, offset: Vec2) -> Vec<u8> {
    let dx = offset.x.round() as i64;
    let dy = offset.y.round() as i64;
    if dx == 0 && dy == 0 {
        return src.as_bytes().to_vec();
    }

    let dims = src.dims();
    let (w, h) = (i64::from(dims.width), i64::from(dims.height));
    let bytes = src.as_bytes();
    let mut out = vec![0u8; bytes.len()];
    for y in 0..h {
        let sy = y - dy;
        if !(0..h).contains(&sy) {
            continue;
        }
        for x in 0..w {
            let sx = x - dx;
            if !(0..w).contains(&sx) {
                continue;
            }
            let d = ((y * w + x) * 4) as usize;
            let s = ((sy * w + sx) * 4) as usize;
            out[d..d + 4].copy_from_slice(&bytes[s..s + 4]);
        }
    }
    out
}

fn gradient_layer(
    target: &Surface,
    start: Point,
    end: Point,
    stops: &[GradientStop],
) -> Option<Vec<u8>> {
    let dims = target.dims();
    let (w, h) = (f64::from(dims.width), f64::from(dims.height));
    let p0 = Point::new(start.x * w, start.y * h);
    let axis = Point::new(end.x * w, end.y * h) - p0;
    let len2 = axis.hypot2();
    if stops.is_empty() || len2 <= f64::EPSILON {
        return None;
    }

    let mut out = Vec::with_capacity(dims.byte_len());
    for y in 0..dims.height {
        for x in 0..dims.width {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = ((p - p0).dot(axis) / len2).clamp(0.0, 1.0) as f32;
            out.extend_from_slice(&sample_stops(stops, t));
        }
    }
    Some(out)
}

/// Premultiplied color at `t`, interpolated in premultiplied space.
fn sample_stops(stops: &[GradientStop], t: f32) -> [u8; 4] {
    let premul = |s: &GradientStop| {
        let a = s.alpha.clamp(0.0, 1.0);
        [
            f32::from(s.rgb[0]) / 255.0 * a,
            f32::from(s.rgb[1]) / 255.0 * a,
            f32::from(s.rgb[2]) / 255.0 * a,
            a,
        ]
    };

    let (lo, hi) = match stops.iter().position(|s| s.offset >= t) {
        Some(0) => (&stops[0], &stops[0]),
        Some(i) => (&stops[i - 1], &stops[i]),
        None => (&stops[stops.len() - 1], &stops[stops.len() - 1]),
    };
    let span = hi.offset - lo.offset;
    let k = if span > 0.0 { (t - lo.offset) / span } else { 0.0 };
    let (a, b) = (premul(lo), premul(hi));
    [0, 1, 2, 3].map(|c| ((a[c] + (b[c] - a[c]) * k).clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
