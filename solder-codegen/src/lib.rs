//! Core graph-resolution and code-generation engine for Solder.

pub mod binds;
pub mod catalog;
pub mod component;
pub mod emit;
pub mod error;
pub mod generator;
pub mod graph;
pub mod lifetime;
pub mod manifest;
pub mod typeref;

pub use error::{Result, WiringError};
pub use lifetime::Lifetime;
pub use typeref::TypeRef;
