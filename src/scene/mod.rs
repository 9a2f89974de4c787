pub(crate) mod build;
pub(crate) mod graph;
pub(crate) mod model;
pub(crate) mod settings;
