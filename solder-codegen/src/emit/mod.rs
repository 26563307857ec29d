//! Code emission — turning resolved graphs into source text.
//!
//! Two strategies exist side by side and the caller picks per round:
//!
//! - [`component`] renders one monolithic wired container per component,
//!   with all parameter wiring decided at generation time.
//! - [`factory`] renders one standalone factory per constructable type;
//!   parameters are looked up at runtime against an
//!   `ObjectGraph` registry.
//!
//! Both emitters are pure functions of their inputs and byte-stable:
//! emitting the same spec twice yields identical artifacts.

pub mod component;
pub mod factory;

pub use component::emit_component;
pub use factory::emit_factory;

/// One emitted source unit. Writing it to disk is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Deterministic file name, e.g. `generated_app_component.rs`.
    pub file_name: String,
    /// The complete source text.
    pub contents: String,
}
