pub(crate) mod classify;
pub(crate) mod elbow;
pub(crate) mod text;
