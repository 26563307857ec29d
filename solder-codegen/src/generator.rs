//! The round driver — one synchronous generation pass.
//!
//! Build integration hands the driver the component carriers and
//! injectable types discovered this compilation round. Symbols the
//! catalog cannot resolve yet are *deferred*: returned to the caller for
//! the next round, not failed. Fatal errors abort only their own root;
//! sibling roots still generate. Nothing is retried or swallowed inside a
//! round: every failure is logged and returned.

use tracing::{error, info, instrument};

use crate::catalog::TypeCatalog;
use crate::component::resolve_component;
use crate::emit::{Artifact, emit_component, emit_factory};
use crate::error::WiringError;
use crate::typeref::TypeRef;

/// The outcome of one generation round.
#[derive(Debug, Default)]
pub struct Round {
    /// Emitted source units, one per successfully generated root.
    pub artifacts: Vec<Artifact>,
    /// Roots not resolvable this round; retry them next round.
    pub deferred: Vec<TypeRef>,
    /// Fatal failures, one per affected root.
    pub failures: Vec<(TypeRef, WiringError)>,
}

impl Round {
    /// `true` when every input produced an artifact.
    pub fn is_clean(&self) -> bool {
        self.deferred.is_empty() && self.failures.is_empty()
    }
}

/// Drives generation rounds over one [`TypeCatalog`].
pub struct Generator<'a, C: TypeCatalog> {
    catalog: &'a C,
}

impl<'a, C: TypeCatalog> Generator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Generates one wired container per component carrier
    /// (component strategy).
    #[instrument(skip_all, name = "component_round")]
    pub fn component_round(&self, carriers: &[TypeRef]) -> Round {
        self.run_round(carriers, |carrier| {
            resolve_component(self.catalog, carrier).map(|spec| emit_component(&spec))
        })
    }

    /// Generates one standalone factory per injectable type
    /// (factory strategy).
    #[instrument(skip_all, name = "factory_round")]
    pub fn factory_round(&self, injectables: &[TypeRef]) -> Round {
        self.run_round(injectables, |ty| emit_factory(self.catalog, ty))
    }

    fn run_round(
        &self,
        roots: &[TypeRef],
        generate: impl Fn(&TypeRef) -> Result<Artifact, WiringError>,
    ) -> Round {
        let mut round = Round::default();

        for root in roots {
            if !self.catalog.is_resolvable(root) {
                info!(root = %root, "symbol not resolvable yet, deferring to next round");
                round.deferred.push(root.clone());
                continue;
            }

            match generate(root) {
                Ok(artifact) => round.artifacts.push(artifact),
                Err(err) => {
                    error!(root = %root, error = %err, "generation failed");
                    round.failures.push((root.clone(), err));
                }
            }
        }

        info!(
            artifacts = round.artifacts.len(),
            deferred = round.deferred.len(),
            failures = round.failures.len(),
            "round finished"
        );
        round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ConstructionSpec, EntryPoint, MemoryCatalog};

    fn ty(name: &str) -> TypeRef {
        TypeRef::parse(name)
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .injectable(ty("app::Greeter"), ConstructionSpec::transient(vec![]))
            .component(
                ty("app::AppComponent"),
                vec![EntryPoint::new("greeter", ty("app::Greeter"))],
                vec![],
            )
    }

    #[test]
    fn clean_component_round() {
        let catalog = catalog();
        let round = Generator::new(&catalog).component_round(&[ty("app::AppComponent")]);

        assert!(round.is_clean());
        assert_eq!(round.artifacts.len(), 1);
        assert_eq!(round.artifacts[0].file_name, "generated_app_component.rs");
    }

    #[test]
    fn unresolvable_carrier_deferred_not_failed() {
        let catalog = catalog().pending(ty("app::LaterComponent"));
        let round = Generator::new(&catalog)
            .component_round(&[ty("app::AppComponent"), ty("app::LaterComponent")]);

        assert_eq!(round.artifacts.len(), 1);
        assert_eq!(round.deferred, vec![ty("app::LaterComponent")]);
        assert!(round.failures.is_empty());
    }

    #[test]
    fn failure_does_not_abort_siblings() {
        let catalog = catalog().component(
            ty("app::BrokenComponent"),
            vec![EntryPoint::new("missing", ty("app::Missing"))],
            vec![],
        );

        let round = Generator::new(&catalog)
            .component_round(&[ty("app::BrokenComponent"), ty("app::AppComponent")]);

        assert_eq!(round.artifacts.len(), 1);
        assert_eq!(round.failures.len(), 1);
        assert_eq!(round.failures[0].0, ty("app::BrokenComponent"));
    }

    #[test]
    fn factory_round_emits_per_type() {
        let catalog = MemoryCatalog::new()
            .injectable(ty("app::Greeter"), ConstructionSpec::transient(vec![]))
            .injectable(ty("app::Cache"), ConstructionSpec::shared(vec![]));

        let round =
            Generator::new(&catalog).factory_round(&[ty("app::Greeter"), ty("app::Cache")]);

        assert!(round.is_clean());
        let names: Vec<&str> = round.artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["greeter_factory.rs", "cache_factory.rs"]);
    }

    #[test]
    fn factory_round_records_failures() {
        let catalog = MemoryCatalog::new();
        let round = Generator::new(&catalog).factory_round(&[ty("app::Unknown")]);

        assert_eq!(round.artifacts.len(), 0);
        assert!(matches!(
            round.failures[0].1,
            WiringError::UnresolvedDependency(_)
        ));
    }
}
