//! The Type Catalog — the oracle supplying construction metadata.
//!
//! The engine never inspects source code itself; everything it knows about
//! a type comes through [`TypeCatalog`]. Any backing store satisfies the
//! contract: static analysis, a declarative manifest (see
//! [`crate::manifest`]), or the explicit registrations of
//! [`MemoryCatalog`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::lifetime::Lifetime;
use crate::typeref::TypeRef;

/// How to build one type: its ordered parameter types and lifetime.
///
/// The construction entry of a type `T` is its `T::new(params…)`
/// associated function in emitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionSpec {
    /// Parameter types, in declaration order.
    pub params: Vec<TypeRef>,
    /// Whether instances are cached by their owner.
    pub lifetime: Lifetime,
}

impl ConstructionSpec {
    pub fn new(params: Vec<TypeRef>, lifetime: Lifetime) -> Self {
        Self { params, lifetime }
    }

    /// A transient spec, the common case.
    pub fn transient(params: Vec<TypeRef>) -> Self {
        Self::new(params, Lifetime::Transient)
    }

    /// A shared (long-lived) spec.
    pub fn shared(params: Vec<TypeRef>) -> Self {
        Self::new(params, Lifetime::Shared)
    }
}

/// A static redirection from an abstract requested type to the concrete
/// type that provides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDirective {
    pub requested: TypeRef,
    pub provided: TypeRef,
}

impl BindingDirective {
    pub fn new(requested: TypeRef, provided: TypeRef) -> Self {
        Self { requested, provided }
    }
}

/// A type a caller obtains directly from a component, exposed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// The exposed accessor name, e.g. `greeter`.
    pub name: String,
    /// The type the accessor returns (before binding substitution).
    pub requested: TypeRef,
}

impl EntryPoint {
    pub fn new(name: impl Into<String>, requested: TypeRef) -> Self {
        Self {
            name: name.into(),
            requested,
        }
    }
}

/// Read-only oracle answering type metadata queries for one generation run.
pub trait TypeCatalog {
    /// All construction entries a type declares. Cardinality is validated
    /// by the graph builder, not here.
    fn construction_specs_of(&self, ty: &TypeRef) -> Vec<ConstructionSpec>;

    /// The binding directives declared on one binding-carrier type.
    fn binding_directives_of(&self, carrier: &TypeRef) -> Vec<BindingDirective>;

    /// The entry points declared on a component carrier.
    fn entry_points_of(&self, component: &TypeRef) -> Vec<EntryPoint>;

    /// The binding-carrier modules a component declaration lists.
    fn carrier_modules_of(&self, component: &TypeRef) -> Vec<TypeRef>;

    /// `false` while a symbol cannot be resolved this round; such inputs
    /// are deferred to the next round instead of failing.
    fn is_resolvable(&self, ty: &TypeRef) -> bool {
        let _ = ty;
        true
    }

    /// Every type the catalog knows a construction entry for. Used only
    /// for "did you mean?" suggestions; order must be deterministic.
    fn known_types(&self) -> Vec<TypeRef> {
        Vec::new()
    }
}

/// One component declaration: its entry points and carrier modules.
#[derive(Debug, Clone, Default)]
struct ComponentDecl {
    entry_points: Vec<EntryPoint>,
    modules: Vec<TypeRef>,
}

/// A [`TypeCatalog`] populated by explicit registration calls.
///
/// The builder methods consume and return `self` so a catalog reads as one
/// declaration block:
///
/// ```
/// use solder_codegen::catalog::{BindingDirective, ConstructionSpec, MemoryCatalog, TypeCatalog};
/// use solder_codegen::typeref::TypeRef;
///
/// let source = TypeRef::parse("app::ConsoleSource");
/// let catalog = MemoryCatalog::new()
///     .injectable(source.clone(), ConstructionSpec::transient(vec![]))
///     .binding_module(
///         TypeRef::parse("app::Bindings"),
///         vec![BindingDirective::new(TypeRef::parse("app::MessageSource"), source.clone())],
///     );
///
/// assert_eq!(catalog.construction_specs_of(&source).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    constructions: HashMap<TypeRef, Vec<ConstructionSpec>>,
    binding_modules: HashMap<TypeRef, Vec<BindingDirective>>,
    components: HashMap<TypeRef, ComponentDecl>,
    pending: HashSet<TypeRef>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructable type. Registering the same type twice
    /// records a second construction entry; the graph builder will then
    /// reject the type as ambiguous.
    pub fn injectable(mut self, ty: TypeRef, spec: ConstructionSpec) -> Self {
        debug!(ty = %ty, lifetime = %spec.lifetime, "registered injectable");
        self.constructions.entry(ty).or_default().push(spec);
        self
    }

    /// Registers a binding-carrier module and its directives.
    pub fn binding_module(mut self, carrier: TypeRef, directives: Vec<BindingDirective>) -> Self {
        debug!(carrier = %carrier, directives = directives.len(), "registered binding module");
        self.binding_modules.entry(carrier).or_default().extend(directives);
        self
    }

    /// Registers a component carrier with its entry points and modules.
    pub fn component(
        mut self,
        carrier: TypeRef,
        entry_points: Vec<EntryPoint>,
        modules: Vec<TypeRef>,
    ) -> Self {
        debug!(carrier = %carrier, entry_points = entry_points.len(), "registered component");
        self.components.insert(
            carrier,
            ComponentDecl {
                entry_points,
                modules,
            },
        );
        self
    }

    /// Marks a type as not resolvable this round; generation over it is
    /// deferred rather than failed.
    pub fn pending(mut self, ty: TypeRef) -> Self {
        self.pending.insert(ty);
        self
    }
}

impl TypeCatalog for MemoryCatalog {
    fn construction_specs_of(&self, ty: &TypeRef) -> Vec<ConstructionSpec> {
        self.constructions.get(ty).cloned().unwrap_or_default()
    }

    fn binding_directives_of(&self, carrier: &TypeRef) -> Vec<BindingDirective> {
        self.binding_modules.get(carrier).cloned().unwrap_or_default()
    }

    fn entry_points_of(&self, component: &TypeRef) -> Vec<EntryPoint> {
        self.components
            .get(component)
            .map(|decl| decl.entry_points.clone())
            .unwrap_or_default()
    }

    fn carrier_modules_of(&self, component: &TypeRef) -> Vec<TypeRef> {
        self.components
            .get(component)
            .map(|decl| decl.modules.clone())
            .unwrap_or_default()
    }

    fn is_resolvable(&self, ty: &TypeRef) -> bool {
        !self.pending.contains(ty)
    }

    fn known_types(&self) -> Vec<TypeRef> {
        let mut types: Vec<TypeRef> = self.constructions.keys().cloned().collect();
        types.sort_by_key(|t| t.qualified());
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(name: &str) -> TypeRef {
        TypeRef::parse(name)
    }

    #[test]
    fn injectable_roundtrip() {
        let catalog = MemoryCatalog::new().injectable(
            ty("app::Greeter"),
            ConstructionSpec::transient(vec![ty("app::MessageSource")]),
        );

        let specs = catalog.construction_specs_of(&ty("app::Greeter"));
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].params, vec![ty("app::MessageSource")]);
        assert!(catalog.construction_specs_of(&ty("app::Unknown")).is_empty());
    }

    #[test]
    fn duplicate_injectable_records_second_entry() {
        let catalog = MemoryCatalog::new()
            .injectable(ty("app::Greeter"), ConstructionSpec::transient(vec![]))
            .injectable(ty("app::Greeter"), ConstructionSpec::shared(vec![]));

        assert_eq!(catalog.construction_specs_of(&ty("app::Greeter")).len(), 2);
    }

    #[test]
    fn component_roundtrip() {
        let catalog = MemoryCatalog::new().component(
            ty("app::AppComponent"),
            vec![EntryPoint::new("greeter", ty("app::Greeter"))],
            vec![ty("app::Bindings")],
        );

        let eps = catalog.entry_points_of(&ty("app::AppComponent"));
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].name, "greeter");
        assert_eq!(
            catalog.carrier_modules_of(&ty("app::AppComponent")),
            vec![ty("app::Bindings")]
        );
    }

    #[test]
    fn pending_types_not_resolvable() {
        let catalog = MemoryCatalog::new().pending(ty("app::Later"));
        assert!(!catalog.is_resolvable(&ty("app::Later")));
        assert!(catalog.is_resolvable(&ty("app::Now")));
    }

    #[test]
    fn known_types_sorted() {
        let catalog = MemoryCatalog::new()
            .injectable(ty("b::Two"), ConstructionSpec::transient(vec![]))
            .injectable(ty("a::One"), ConstructionSpec::transient(vec![]));

        let names: Vec<String> = catalog.known_types().iter().map(|t| t.qualified()).collect();
        assert_eq!(names, vec!["a::One", "b::Two"]);
    }
}
