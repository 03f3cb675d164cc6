use crate::foundation::core::Intensity;
use crate::foundation::error::LucentResult;
use crate::modes::EffectMode;

/// User-owned parameters, read by value once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls<M: EffectMode> {
    /// Active preset.
    pub mode: M,
    /// Effect strength.
    pub intensity: Intensity,
}

impl<M: EffectMode> Controls<M> {
    /// Controls from already-validated values.
    pub fn new(mode: M, intensity: Intensity) -> Self {
        Self { mode, intensity }
    }

    /// Validate a mode key and a raw intensity.
    pub fn parse(mode: &str, intensity: u32) -> LucentResult<Self> {
        Ok(Self {
            mode: M::from_key(mode)?,
            intensity: Intensity::new(intensity)?,
        })
    }
}

impl<M: EffectMode> Default for Controls<M> {
    fn default() -> Self {
        Self {
            mode: M::ALL[0],
            intensity: Intensity::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controls.rs"]
mod tests;
