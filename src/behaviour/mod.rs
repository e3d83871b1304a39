pub(crate) mod behaviour;
pub(crate) mod collection;
pub(crate) mod effects;
pub(crate) mod linker;
