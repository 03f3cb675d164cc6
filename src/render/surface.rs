use crate::foundation::core::{Dims, FrameBuffer};
use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 drawing target.
///
/// The presentation surface and every intermediate layer use this representation; frames
/// cross into and out of it through [`Surface::from_frame`] and [`Surface::to_frame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    dims: Dims,
    data: Vec<u8>,
}

impl Surface {
    /// Transparent surface.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            data: vec![0u8; dims.byte_len()],
        }
    }

    /// Surface dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Premultiplied bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Fill with a straight-alpha color.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        let px = premul_rgba8(rgba);
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Reallocate to new dimensions; contents become transparent.
    pub fn reallocate(&mut self, dims: Dims) {
        *self = Self::new(dims);
    }

    /// Premultiply a straight-alpha frame.
    pub fn from_frame(frame: &FrameBuffer) -> Self {
        let mut data = frame.as_bytes().to_vec();
        for px in data.chunks_exact_mut(4) {
            let p = premul_rgba8([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        Self {
            dims: frame.dims(),
            data,
        }
    }

    /// Unpremultiply into a straight-alpha frame.
    pub fn to_frame(&self) -> FrameBuffer {
        let mut out = FrameBuffer::new(self.dims);
        for (d, s) in out
            .as_bytes_mut()
            .chunks_exact_mut(4)
            .zip(self.data.chunks_exact(4))
        {
            d.copy_from_slice(&unpremul_rgba8([s[0], s[1], s[2], s[3]]));
        }
        out
    }
}

pub(crate) fn premul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
        px[3],
    ]
}

pub(crate) fn unpremul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
