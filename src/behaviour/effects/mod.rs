//! Built-in effects.

pub(crate) mod fade;
pub(crate) mod position;
pub(crate) mod scale;
pub(crate) mod translate;
