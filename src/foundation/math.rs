/// Clamp a channel value into `[0, 255]`. NaN maps to 0.
pub(crate) fn clamp_channel(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 255.0)
}

/// Round a channel value to the nearest integer and store it as a byte.
pub(crate) fn channel_u8(v: f64) -> u8 {
    clamp_channel(v.round()) as u8
}

/// Round half toward positive infinity (`floor(v + 0.5)`).
///
/// Displacement offsets depend on this tie rule; `f64::round` rounds ties away from zero.
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Floored modulo: the result always lies in `[0, m)` for `m > 0`.
pub(crate) fn wrap(v: i64, m: u32) -> u32 {
    debug_assert!(m > 0);
    v.rem_euclid(i64::from(m)) as u32
}

/// Linear interpolation `a*(1-t) + b*t`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
