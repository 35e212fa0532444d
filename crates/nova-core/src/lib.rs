//! Core shared types for Nova.
//!
//! This crate is intentionally small: it only carries the name types every
//! other crate needs to talk about Java packages and classes.

mod name;

pub use name::{ClassName, Name, PackageName};
