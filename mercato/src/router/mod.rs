//! The command route tree and its introspection surface.

pub(crate) mod introspect;
mod tree;

pub(crate) use tree::{Route, Router};
