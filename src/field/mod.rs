pub(crate) mod atmosphere;
pub(crate) mod clock;
pub(crate) mod distortion;
