use crate::foundation::core::Dims;

/// Horizontal space the layout reserves around the presentation surface.
pub const LAYOUT_GUTTER: u32 = 64;

/// Processing size used when the source cannot report its native size.
pub const FALLBACK_PROCESSING: Dims = Dims {
    width: 320,
    height: 180,
};

/// Presentation size for a layout width: 16:9, between 300 and 1200 pixels wide.
pub fn presentation_dims(viewport_width: u32) -> Dims {
    let width = viewport_width.saturating_sub(LAYOUT_GUTTER).clamp(300, 1200);
    let height = ((f64::from(width) * 9.0 / 16.0).round() as u32).max(220);
    Dims { width, height }
}

/// Processing size derived from the source's native size, keeping its aspect ratio.
pub fn processing_dims(native: Option<Dims>) -> Dims {
    let Some(native) = native.filter(|d| d.width > 0 && d.height > 0) else {
        return FALLBACK_PROCESSING;
    };
    let aspect = f64::from(native.width) / f64::from(native.height);
    let width = ((300.0 * aspect).round() as u32).clamp(240, 420);
    let height = ((f64::from(width) / aspect).round() as u32).max(150);
    Dims { width, height }
}

#[cfg(test)]
#[path = "../../tests/unit/session/layout.rs"]
mod tests;
