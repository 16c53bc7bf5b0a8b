pub(crate) mod info;
pub(crate) mod list;
