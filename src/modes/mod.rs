use crate::foundation::error::{LucentError, LucentResult};
use std::fmt;

/// A closed set of named presets selectable by exact key.
pub trait EffectMode:
    Copy + fmt::Debug + fmt::Display + PartialEq + Eq + Send + Sync + 'static
{
    /// Every preset, in menu order.
    const ALL: &'static [Self];

    /// Stable lookup key.
    fn key(self) -> &'static str;

    /// Resolve a key by exact match. Unknown keys are rejected, never defaulted.
    fn from_key(key: &str) -> LucentResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|m| m.key()).collect();
                LucentError::validation(format!(
                    "unknown mode '{key}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

macro_rules! impl_mode_traits {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(crate::modes::EffectMode::key(*self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::foundation::error::LucentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as crate::modes::EffectMode>::from_key(s)
            }
        }
    };
}

pub(crate) mod atmosphere;
pub(crate) mod distortion;

#[cfg(test)]
#[path = "../../tests/unit/modes/modes.rs"]
mod tests;
