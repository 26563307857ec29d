//! Error types for graph resolution and code generation.
//!
//! Every fatal condition carries enough structure to print an actionable
//! diagnostic: who requested the type, what the cycle looks like, which
//! registered types come close.

use std::fmt;

use solder_support::rendering::render_chain;

use crate::typeref::TypeRef;

/// Main error type for all wiring operations.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    /// A type declares more than one construction entry.
    #[error("{}", .0)]
    MultipleConstructionEntries(MultipleConstructionEntriesError),

    /// A required type has neither a construction entry nor a binding.
    #[error("{}", .0)]
    UnresolvedDependency(UnresolvedDependencyError),

    /// An entry point's (substituted) type is not covered by any factory.
    #[error("{}", .0)]
    UnresolvedEntryPoint(UnresolvedEntryPointError),

    /// The substituted parameter chain of a type reaches back to itself.
    #[error("{}", .0)]
    CyclicDependency(CyclicDependencyError),
}

/// Error when a type declares more than one construction entry.
///
/// Generation never silently picks one; the declaration itself is
/// ambiguous and must be fixed at the source.
#[derive(Debug)]
pub struct MultipleConstructionEntriesError {
    /// The ambiguous type
    pub ty: TypeRef,
    /// How many entries it declares
    pub count: usize,
}

impl fmt::Display for MultipleConstructionEntriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} declares {} construction entries, expected exactly one",
            self.ty, self.count,
        )?;
        write!(f, "\n  Hint: keep a single designated constructor per type")
    }
}

/// Error when a required type cannot be constructed.
#[derive(Debug)]
pub struct UnresolvedDependencyError {
    /// The type that was requested
    pub requested: TypeRef,
    /// The factory whose parameter list required it (`None` for roots)
    pub required_by: Option<TypeRef>,
    /// Catalog types with similar names, best match first
    pub suggestions: Vec<TypeRef>,
}

impl fmt::Display for UnresolvedDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no construction entry for {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: declare a construction entry for {} or bind it to a concrete type",
            self.requested.name(),
        )
    }
}

/// Error when an entry point cannot be served by the resolved graph.
#[derive(Debug)]
pub struct UnresolvedEntryPointError {
    /// The exposed accessor name declared on the component
    pub entry_point: String,
    /// The type the entry point asks for
    pub requested: TypeRef,
    /// The type after binding substitution (equal to `requested` when unbound)
    pub resolved: TypeRef,
}

impl fmt::Display for UnresolvedEntryPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry point `{}` requests {}, which no factory covers",
            self.entry_point, self.requested,
        )?;
        if self.resolved != self.requested {
            write!(f, "\n  Bound to: {}", self.resolved)?;
        }
        write!(
            f,
            "\n  Hint: give {} a construction entry or bind it to a type that has one",
            self.resolved.name(),
        )
    }
}

/// Error when the graph contains a true cycle.
///
/// The chain starts and ends at the repeated type so the loop is visible
/// in full.
#[derive(Debug)]
pub struct CyclicDependencyError {
    /// The cycle, e.g. `[A, B, A]`
    pub chain: Vec<TypeRef>,
}

impl fmt::Display for CyclicDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.chain.iter().map(|t| t.qualified()).collect();
        write!(f, "cyclic dependency:\n  {}", render_chain(&names))?;
        write!(f, "\n  Hint: break the loop by restructuring one of these constructors")
    }
}

/// Convenient Result type for wiring operations.
pub type Result<T> = std::result::Result<T, WiringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_entries_display() {
        let err = WiringError::MultipleConstructionEntries(MultipleConstructionEntriesError {
            ty: TypeRef::parse("app::Greeter"),
            count: 2,
        });
        let msg = format!("{err}");
        assert!(msg.contains("app::Greeter"));
        assert!(msg.contains("2 construction entries"));
    }

    #[test]
    fn unresolved_dependency_display() {
        let err = WiringError::UnresolvedDependency(UnresolvedDependencyError {
            requested: TypeRef::parse("app::MessageSource"),
            required_by: Some(TypeRef::parse("app::Greeter")),
            suggestions: vec![TypeRef::parse("app::ConsoleSource")],
        });
        let msg = format!("{err}");
        assert!(msg.contains("no construction entry"));
        assert!(msg.contains("Required by: app::Greeter"));
        assert!(msg.contains("ConsoleSource"));
    }

    #[test]
    fn unresolved_entry_point_display() {
        let err = WiringError::UnresolvedEntryPoint(UnresolvedEntryPointError {
            entry_point: "greeter".into(),
            requested: TypeRef::parse("app::MessageSource"),
            resolved: TypeRef::parse("app::ConsoleSource"),
        });
        let msg = format!("{err}");
        assert!(msg.contains("`greeter`"));
        assert!(msg.contains("Bound to: app::ConsoleSource"));
    }

    #[test]
    fn cyclic_dependency_display() {
        let err = WiringError::CyclicDependency(CyclicDependencyError {
            chain: vec![
                TypeRef::parse("a::A"),
                TypeRef::parse("a::B"),
                TypeRef::parse("a::A"),
            ],
        });
        let msg = format!("{err}");
        assert!(msg.contains("cyclic"));
        assert!(msg.contains("→"));
    }
}
