//! CLI command implementations.

pub(crate) mod link;

pub(crate) use link::LinkArgs;
