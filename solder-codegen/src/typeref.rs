//! Nominal type references.
//!
//! [`TypeRef`] identifies a type in the catalog by its module path and
//! simple name. The engine never touches live Rust types, only these
//! references, so two runs over the same metadata behave identically.

use std::fmt;

/// Identifies one nominal type for the duration of a generation run.
///
/// Equality and hashing cover the full qualified name, so the same simple
/// name in two modules stays two distinct types.
///
/// # Examples
/// ```
/// use solder_codegen::typeref::TypeRef;
///
/// let ty = TypeRef::parse("app::data::LocalSource");
/// assert_eq!(ty.module(), "app::data");
/// assert_eq!(ty.name(), "LocalSource");
/// assert_eq!(ty.qualified(), "app::data::LocalSource");
///
/// // A bare name lives in the root module
/// let bare = TypeRef::parse("Greeter");
/// assert_eq!(bare.module(), "");
/// assert_eq!(bare.qualified(), "Greeter");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    module: String,
    name: String,
}

impl TypeRef {
    /// Creates a reference from a module path and a simple name.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Parses a qualified name, splitting on the last `::`.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once("::") {
            Some((module, name)) => Self::new(module, name),
            None => Self::new("", qualified),
        }
    }

    /// Returns the module path (empty for root-module types).
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the simple name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the qualified name, `module::Name`.
    pub fn qualified(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module, self.name)
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.qualified())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_qualified_name() {
        let ty = TypeRef::parse("app::usecase::Greeter");
        assert_eq!(ty.module(), "app::usecase");
        assert_eq!(ty.name(), "Greeter");
    }

    #[test]
    fn parse_bare_name() {
        let ty = TypeRef::parse("Greeter");
        assert_eq!(ty.module(), "");
        assert_eq!(ty.qualified(), "Greeter");
    }

    #[test]
    fn equality_covers_module() {
        assert_eq!(TypeRef::parse("a::X"), TypeRef::parse("a::X"));
        assert_ne!(TypeRef::parse("a::X"), TypeRef::parse("b::X"));
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(TypeRef::parse("app::Greeter"), 1);
        assert_eq!(map.get(&TypeRef::parse("app::Greeter")), Some(&1));
        assert_eq!(map.get(&TypeRef::parse("app::Cache")), None);
    }

    #[test]
    fn display_is_qualified() {
        assert_eq!(format!("{}", TypeRef::parse("a::b::C")), "a::b::C");
    }
}
