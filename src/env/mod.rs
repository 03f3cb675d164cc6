pub(crate) mod weather;
