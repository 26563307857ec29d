//! Runtime support library linked by Solder-generated wiring.
//!
//! Generated code needs three things at runtime: the
//! [`Shared`] sharing primitive for long-lived instances, the
//! [`ObjectGraph`] lookup registry used by factory-strategy units, and
//! the [`Factory`] trait those units implement. Everything else happens
//! at generation time.

pub mod error;
pub mod graph;
pub mod key;
pub mod shared;

pub use error::{GraphError, Result};
pub use graph::{Factory, ObjectGraph};
pub use key::TypeKey;
pub use shared::{SharePolicy, Shared};
