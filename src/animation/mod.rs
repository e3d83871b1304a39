pub(crate) mod curve;
pub(crate) mod timeline;
pub(crate) mod timing;
