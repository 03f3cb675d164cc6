pub(crate) mod config;
pub(crate) mod controls;
pub(crate) mod driver;
pub(crate) mod effect;
pub(crate) mod layout;
pub(crate) mod runner;
