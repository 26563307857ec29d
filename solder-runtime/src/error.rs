//! Error types for runtime graph lookups.

use solder_support::rendering::shorten_type_name;

use crate::key::TypeKey;

/// Error raised by [`ObjectGraph`](crate::graph::ObjectGraph) lookups.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// No factory was registered for the requested type.
    #[error(
        "no factory registered for {}\n  Hint: register a factory for this type before resolving it",
        shorten_type_name(.key.type_name())
    )]
    NotRegistered {
        /// The type that was requested
        key: TypeKey,
    },

    /// A registered factory produced a value of the wrong type.
    #[error(
        "factory for {} produced a value of a different type",
        shorten_type_name(.key.type_name())
    )]
    TypeMismatch {
        /// The type whose factory misbehaved
        key: TypeKey,
    },
}

/// Convenient Result type for runtime graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
