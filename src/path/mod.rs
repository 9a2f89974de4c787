pub(crate) mod curve;
pub(crate) mod segment;
pub(crate) mod table;
