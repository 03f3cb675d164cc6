pub(crate) mod atmosphere;
pub(crate) mod distortion;
