pub(crate) mod ease;
pub(crate) mod keyframes;
pub(crate) mod noise;
pub(crate) mod param;
