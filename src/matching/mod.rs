pub(crate) mod cost;
pub(crate) mod grouping;
pub(crate) mod groups;
pub(crate) mod mapping;
pub(crate) mod residual;
pub(crate) mod text;
