//! Filesystem primitives used by [`operations`](crate::operations).
pub mod fs;
pub mod glob;
pub mod symlink;
