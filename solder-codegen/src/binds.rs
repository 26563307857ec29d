//! Binding resolution — flattening carrier directives into one map.
//!
//! A [`BindingMap`] merges the directives of an ordered list of carrier
//! modules into a single requested→provided mapping. When two carriers
//! redirect the same requested type, **the last applicable directive
//! wins** (carrier order, then directive order within a carrier); the
//! override is logged. Whether the provided type is constructable is not
//! checked here; the graph builder validates that during traversal.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::TypeCatalog;
use crate::typeref::TypeRef;

/// The flattened requested→provided mapping of one component.
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    map: HashMap<TypeRef, TypeRef>,
}

impl BindingMap {
    /// Flattens the directives of `carriers` (in order) into one map.
    pub fn from_carriers<C: TypeCatalog>(catalog: &C, carriers: &[TypeRef]) -> Self {
        let mut map = HashMap::new();

        for carrier in carriers {
            for directive in catalog.binding_directives_of(carrier) {
                if let Some(previous) =
                    map.insert(directive.requested.clone(), directive.provided.clone())
                {
                    warn!(
                        requested = %directive.requested,
                        replaced = %previous,
                        provided = %directive.provided,
                        "binding overridden, last directive wins"
                    );
                } else {
                    debug!(
                        requested = %directive.requested,
                        provided = %directive.provided,
                        "binding recorded"
                    );
                }
            }
        }

        Self { map }
    }

    /// Substitutes a requested type for its bound provided type, or echoes
    /// the input when no directive applies.
    pub fn resolve(&self, ty: &TypeRef) -> TypeRef {
        self.map.get(ty).cloned().unwrap_or_else(|| ty.clone())
    }

    /// All provided (concrete) types, sorted by qualified name so graph
    /// roots seed in a stable order.
    pub fn provided_types(&self) -> Vec<TypeRef> {
        let mut provided: Vec<TypeRef> = self.map.values().cloned().collect();
        provided.sort_by_key(|t| t.qualified());
        provided.dedup();
        provided
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BindingDirective, MemoryCatalog};

    fn ty(name: &str) -> TypeRef {
        TypeRef::parse(name)
    }

    fn bind(requested: &str, provided: &str) -> BindingDirective {
        BindingDirective::new(ty(requested), ty(provided))
    }

    #[test]
    fn merges_directives_across_carriers() {
        let catalog = MemoryCatalog::new()
            .binding_module(ty("app::DataBinds"), vec![bind("app::Source", "app::LocalSource")])
            .binding_module(ty("app::DomainBinds"), vec![bind("app::UseCase", "app::UseCaseImpl")]);

        let binds = BindingMap::from_carriers(
            &catalog,
            &[ty("app::DataBinds"), ty("app::DomainBinds")],
        );

        assert_eq!(binds.len(), 2);
        assert_eq!(binds.resolve(&ty("app::Source")), ty("app::LocalSource"));
        assert_eq!(binds.resolve(&ty("app::UseCase")), ty("app::UseCaseImpl"));
    }

    #[test]
    fn last_directive_wins() {
        let catalog = MemoryCatalog::new()
            .binding_module(ty("app::First"), vec![bind("app::Source", "app::LocalSource")])
            .binding_module(ty("app::Second"), vec![bind("app::Source", "app::RemoteSource")]);

        let binds =
            BindingMap::from_carriers(&catalog, &[ty("app::First"), ty("app::Second")]);

        assert_eq!(binds.resolve(&ty("app::Source")), ty("app::RemoteSource"));
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn unbound_type_resolves_to_itself() {
        let binds = BindingMap::default();
        assert_eq!(binds.resolve(&ty("app::Greeter")), ty("app::Greeter"));
    }

    #[test]
    fn provided_types_sorted_and_deduped() {
        let catalog = MemoryCatalog::new().binding_module(
            ty("app::Binds"),
            vec![
                bind("app::B", "app::Zeta"),
                bind("app::A", "app::Alpha"),
                bind("app::C", "app::Alpha"),
            ],
        );

        let binds = BindingMap::from_carriers(&catalog, &[ty("app::Binds")]);
        let names: Vec<String> =
            binds.provided_types().iter().map(|t| t.qualified()).collect();
        assert_eq!(names, vec!["app::Alpha", "app::Zeta"]);
    }
}
