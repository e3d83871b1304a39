pub(crate) mod arena;
pub(crate) mod context;
pub(crate) mod view;
