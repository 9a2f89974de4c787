pub(crate) mod cache;
pub(crate) mod fingerprint;
pub(crate) mod gate;
pub(crate) mod snapshot;
pub(crate) mod walker;
