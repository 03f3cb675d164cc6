use crate::foundation::error::{LucentError, LucentResult};

/// Pixel dimensions of a buffer or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dims {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dims {
    /// Create validated, non-empty dimensions.
    pub fn new(width: u32, height: u32) -> LucentResult<Self> {
        if width == 0 || height == 0 {
            return Err(LucentError::validation(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Number of RGBA8 bytes.
    pub fn byte_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }
}

/// User intensity in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Intensity(u8);

impl Intensity {
    /// Lowest valid intensity.
    pub const MIN: Self = Self(0);
    /// Highest valid intensity.
    pub const MAX: Self = Self(100);

    /// Create a validated intensity.
    pub fn new(value: u32) -> LucentResult<Self> {
        if value > 100 {
            return Err(LucentError::validation(format!(
                "intensity must be in 0..=100, got {value}"
            )));
        }
        Ok(Self(value as u8))
    }

    /// Raw percentage.
    pub fn value(self) -> u32 {
        u32::from(self.0)
    }

    /// Linear rescale into `[0, 1]`.
    pub fn factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u32> for Intensity {
    type Error = LucentError;

    fn try_from(value: u32) -> LucentResult<Self> {
        Self::new(value)
    }
}

impl From<Intensity> for u32 {
    fn from(value: Intensity) -> Self {
        value.value()
    }
}

/// Timing inputs for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the animation started. Drives every periodic term.
    pub elapsed_ms: f64,
    /// Wall-clock time as Unix milliseconds (time-of-day derived fields).
    pub wall_unix_ms: i64,
}

/// Dense, row-major RGBA8 (straight alpha) pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    dims: Dims,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed (transparent black) buffer.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            data: vec![0u8; dims.byte_len()],
        }
    }

    /// Allocate a buffer filled with one color.
    pub fn filled(dims: Dims, px: [u8; 4]) -> Self {
        let mut out = Self::new(dims);
        out.fill(px);
        out
    }

    /// Wrap raw RGBA8 bytes; the length must match `width*height*4`.
    pub fn from_raw(dims: Dims, data: Vec<u8>) -> LucentResult<Self> {
        if data.len() != dims.byte_len() {
            return Err(LucentError::validation(format!(
                "frame buffer expects {} bytes for {}x{}, got {}",
                dims.byte_len(),
                dims.width,
                dims.height,
                data.len()
            )));
        }
        Ok(Self { dims, data })
    }

    /// Buffer dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the raw bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume into raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.dims.width as usize) + (x as usize)) * 4
    }

    /// Read pixel `(x, y)`. Out-of-range coordinates read as transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.dims.width || y >= self.dims.height {
            return [0, 0, 0, 0];
        }
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Read the pixel starting at a flat byte offset, if the whole pixel is in range.
    pub fn pixel_at_offset(&self, offset: usize) -> Option<[u8; 4]> {
        let px = self.data.get(offset..offset.checked_add(4)?)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite pixel `(x, y)`; out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if x >= self.dims.width || y >= self.dims.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, px: [u8; 4]) {
        for c in self.data.chunks_exact_mut(4) {
            c.copy_from_slice(&px);
        }
    }

    /// Reset every byte to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy another buffer of identical dimensions into this one.
    pub fn copy_from(&mut self, other: &FrameBuffer) -> LucentResult<()> {
        if other.dims != self.dims {
            return Err(LucentError::render(format!(
                "copy_from expects {}x{}, got {}x{}",
                self.dims.width, self.dims.height, other.dims.width, other.dims.height
            )));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Resample into new dimensions with bilinear filtering.
    pub fn resized(&self, dims: Dims) -> LucentResult<FrameBuffer> {
        if dims == self.dims {
            return Ok(self.clone());
        }
        let img = self.to_image()?;
        let out = image::imageops::resize(
            &img,
            dims.width,
            dims.height,
            image::imageops::FilterType::Triangle,
        );
        FrameBuffer::from_image(out)
    }

    /// Convert into an `image` crate buffer.
    pub fn to_image(&self) -> LucentResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.dims.width, self.dims.height, self.data.clone())
            .ok_or_else(|| LucentError::render("frame buffer does not match its dimensions"))
    }

    /// Build from an `image` crate buffer.
    pub fn from_image(img: image::RgbaImage) -> LucentResult<FrameBuffer> {
        let dims = Dims::new(img.width(), img.height())?;
        Self::from_raw(dims, img.into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
