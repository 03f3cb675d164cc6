pub(crate) mod blend;
pub(crate) mod blur;
pub(crate) mod compositor;
pub(crate) mod filter;
pub(crate) mod surface;
