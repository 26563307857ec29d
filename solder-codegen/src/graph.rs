//! Dependency graph resolution.
//!
//! Converts a set of root types into an ordered, deduplicated list of
//! [`FactorySpec`]s via a FIFO work-list, substituting bindings before
//! every parameter is visited. Factories appear in discovery order
//! (breadth-first), so repeated resolution over unchanged input is
//! byte-identical downstream.
//!
//! After traversal a three-state depth-first pass
//! (unvisited / in-progress / done) walks the resolved edges; a node
//! reached while in-progress is a true cycle and fails resolution. The
//! work-list alone terminates on cyclic input (the visited set
//! deduplicates) but would hand the emitters an infinitely recursive
//! construction, so cycles are rejected here.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, instrument, warn};

use solder_support::rendering::suggest_similar;

use crate::binds::BindingMap;
use crate::catalog::TypeCatalog;
use crate::error::{
    CyclicDependencyError, MultipleConstructionEntriesError, Result, UnresolvedDependencyError,
    WiringError,
};
use crate::lifetime::Lifetime;
use crate::typeref::TypeRef;

/// One resolved construction step: a concrete type, its parameters after
/// binding substitution, and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorySpec {
    /// The concrete type this factory builds.
    pub ty: TypeRef,
    /// Parameter types, already substituted through the binding map.
    pub params: Vec<TypeRef>,
    /// Whether the owning container or graph caches the instance.
    pub lifetime: Lifetime,
}

/// Resolves root types into an ordered factory list.
pub struct GraphBuilder<'a, C: TypeCatalog> {
    catalog: &'a C,
    binds: &'a BindingMap,
}

impl<'a, C: TypeCatalog> GraphBuilder<'a, C> {
    pub fn new(catalog: &'a C, binds: &'a BindingMap) -> Self {
        Self { catalog, binds }
    }

    /// Traverses the graph from `roots` and returns the factories in
    /// discovery order.
    ///
    /// # Errors
    /// - [`WiringError::MultipleConstructionEntries`] — a type declares
    ///   more than one construction entry
    /// - [`WiringError::UnresolvedDependency`] — a required type has no
    ///   construction entry
    /// - [`WiringError::CyclicDependency`] — the substituted parameter
    ///   chain of a type reaches back to itself
    #[instrument(skip_all, name = "graph_resolution")]
    pub fn build(&self, roots: &[TypeRef]) -> Result<Vec<FactorySpec>> {
        let mut queue: VecDeque<(TypeRef, Option<TypeRef>)> =
            roots.iter().map(|ty| (ty.clone(), None)).collect();
        let mut visited: HashSet<TypeRef> = HashSet::new();
        let mut factories: Vec<FactorySpec> = Vec::new();

        debug!(roots = roots.len(), "starting graph resolution");

        while let Some((ty, required_by)) = queue.pop_front() {
            if !visited.insert(ty.clone()) {
                continue;
            }

            let specs = self.catalog.construction_specs_of(&ty);
            let spec = match specs.as_slice() {
                [spec] => spec,
                [] => {
                    return Err(WiringError::UnresolvedDependency(unresolved_error(
                        self.catalog,
                        ty,
                        required_by,
                    )));
                }
                _ => {
                    warn!(ty = %ty, count = specs.len(), "ambiguous construction entry");
                    return Err(WiringError::MultipleConstructionEntries(
                        MultipleConstructionEntriesError {
                            ty,
                            count: specs.len(),
                        },
                    ));
                }
            };

            // Substitute before visiting: parameters enter the work-list
            // as their provided types, never as the requested abstraction.
            let params: Vec<TypeRef> =
                spec.params.iter().map(|p| self.binds.resolve(p)).collect();
            for param in &params {
                queue.push_back((param.clone(), Some(ty.clone())));
            }

            debug!(ty = %ty, params = params.len(), lifetime = %spec.lifetime, "factory recorded");
            factories.push(FactorySpec {
                ty,
                params,
                lifetime: spec.lifetime,
            });
        }

        CycleCheck::new(&factories).run()?;

        debug!(factories = factories.len(), "graph resolved");
        Ok(factories)
    }
}

/// Builds an [`UnresolvedDependencyError`] with "did you mean?"
/// suggestions drawn from the catalog's known types.
pub(crate) fn unresolved_error<C: TypeCatalog>(
    catalog: &C,
    requested: TypeRef,
    required_by: Option<TypeRef>,
) -> UnresolvedDependencyError {
    let known = catalog.known_types();
    let names: Vec<String> = known.iter().map(|t| t.qualified()).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let picks = suggest_similar(&requested.qualified(), &name_refs, 3);
    let suggestions = known
        .into_iter()
        .filter(|t| picks.contains(&t.qualified()))
        .collect();

    UnresolvedDependencyError {
        requested,
        required_by,
        suggestions,
    }
}

/// Three-state DFS over resolved factory edges.
struct CycleCheck<'f> {
    edges: HashMap<&'f TypeRef, &'f [TypeRef]>,
    visiting: HashSet<&'f TypeRef>,
    done: HashSet<&'f TypeRef>,
    path: Vec<&'f TypeRef>,
}

impl<'f> CycleCheck<'f> {
    fn new(factories: &'f [FactorySpec]) -> Self {
        Self {
            edges: factories
                .iter()
                .map(|f| (&f.ty, f.params.as_slice()))
                .collect(),
            visiting: HashSet::new(),
            done: HashSet::new(),
            path: Vec::new(),
        }
    }

    fn run(mut self) -> Result<()> {
        let types: Vec<&TypeRef> = self.edges.keys().copied().collect();
        for ty in types {
            if !self.done.contains(ty) {
                self.visit(ty)?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, ty: &'f TypeRef) -> Result<()> {
        if self.done.contains(ty) {
            return Ok(());
        }

        if self.visiting.contains(ty) {
            let start = self.path.iter().position(|t| *t == ty).unwrap_or(0);
            let mut chain: Vec<TypeRef> = self.path[start..].iter().map(|t| (*t).clone()).collect();
            chain.push(ty.clone());

            warn!(cycle = ?chain, "cyclic dependency detected");
            return Err(WiringError::CyclicDependency(CyclicDependencyError { chain }));
        }

        self.visiting.insert(ty);
        self.path.push(ty);

        if let Some(params) = self.edges.get(ty).copied() {
            for param in params {
                self.visit(param)?;
            }
        }

        self.path.pop();
        self.visiting.remove(ty);
        self.done.insert(ty);
        Ok(())
    }
}
