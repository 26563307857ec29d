//! # Solder — compile-time dependency wiring for Rust
//!
//! Solder resolves an object graph from declarative metadata and emits
//! the Rust source that wires it, with no runtime reflection. A build
//! pipeline feeds a [`TypeCatalog`](codegen::catalog::TypeCatalog)
//! (explicit registrations or a TOML manifest) into a
//! [`Generator`](codegen::generator::Generator) round and writes the
//! returned artifacts wherever its generated-sources directory lives.
//!
//! Two emission strategies are available per round:
//!
//! - **Component**: one wired container per component declaration, with
//!   all parameters resolved at generation time.
//! - **Factory**: one standalone factory per injectable type, resolving
//!   parameters at runtime through an [`ObjectGraph`](runtime::ObjectGraph).

pub use solder_codegen as codegen;
pub use solder_runtime as runtime;
pub use solder_support as support;

/// The commonly needed surface in one import.
pub mod prelude {
    pub use solder_codegen::binds::BindingMap;
    pub use solder_codegen::catalog::{
        BindingDirective, ConstructionSpec, EntryPoint, MemoryCatalog, TypeCatalog,
    };
    pub use solder_codegen::component::{ComponentSpec, resolve_component};
    pub use solder_codegen::emit::{Artifact, emit_component, emit_factory};
    pub use solder_codegen::generator::{Generator, Round};
    pub use solder_codegen::manifest::Manifest;
    pub use solder_codegen::{Lifetime, Result, TypeRef, WiringError};
    pub use solder_runtime::{Factory, GraphError, ObjectGraph, SharePolicy, Shared, TypeKey};
}
