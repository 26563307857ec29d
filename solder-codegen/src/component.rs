//! Component resolution — one wired graph per component carrier.
//!
//! A [`ComponentSpec`] is the fully resolved form of one component
//! declaration: its entry points (with binding substitution applied), the
//! flattened binding map, and the ordered factory list. It is built once
//! per generation unit and never mutated afterwards; the emitters are pure
//! functions over it.

use tracing::{debug, instrument};

use crate::binds::BindingMap;
use crate::catalog::TypeCatalog;
use crate::error::{Result, UnresolvedEntryPointError, WiringError};
use crate::graph::{FactorySpec, GraphBuilder};
use crate::typeref::TypeRef;

/// An entry point with its binding substitution already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntryPoint {
    /// The exposed accessor name.
    pub name: String,
    /// The type the component declaration asks for.
    pub requested: TypeRef,
    /// The type actually constructed (equal to `requested` when unbound).
    pub resolved: TypeRef,
}

/// One resolved component graph, ready for emission.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    /// The component carrier type.
    pub carrier: TypeRef,
    /// Name of the generated container type, `Generated<CarrierName>`.
    pub generated_name: String,
    /// Entry points in declaration order.
    pub entry_points: Vec<ResolvedEntryPoint>,
    /// The flattened binding map.
    pub binds: BindingMap,
    /// Factories in discovery order.
    pub factories: Vec<FactorySpec>,
}

/// Resolves one component carrier into a [`ComponentSpec`].
///
/// Roots are seeded as all binding-provided types (sorted) followed by
/// the substituted entry-point types in declaration order, so a bound
/// leaf always precedes the consumers discovered through an entry point.
///
/// # Errors
/// Everything [`GraphBuilder::build`] raises, plus
/// [`WiringError::UnresolvedEntryPoint`] when an entry point's
/// substituted type cannot be covered by any factory.
#[instrument(skip(catalog), name = "component_resolution", fields(carrier = %carrier))]
pub fn resolve_component<C: TypeCatalog>(catalog: &C, carrier: &TypeRef) -> Result<ComponentSpec> {
    let declared = catalog.entry_points_of(carrier);
    let modules = catalog.carrier_modules_of(carrier);
    let binds = BindingMap::from_carriers(catalog, &modules);

    let entry_points: Vec<ResolvedEntryPoint> = declared
        .into_iter()
        .map(|ep| {
            let resolved = binds.resolve(&ep.requested);
            ResolvedEntryPoint {
                name: ep.name,
                requested: ep.requested,
                resolved,
            }
        })
        .collect();

    let mut roots = binds.provided_types();
    roots.extend(entry_points.iter().map(|ep| ep.resolved.clone()));

    debug!(
        entry_points = entry_points.len(),
        bindings = binds.len(),
        roots = roots.len(),
        "resolving component graph"
    );

    let factories = GraphBuilder::new(catalog, &binds)
        .build(&roots)
        .map_err(|err| reclassify_entry_root(err, &entry_points))?;

    // Every entry point must land on a factory.
    for ep in &entry_points {
        if !factories.iter().any(|f| f.ty == ep.resolved) {
            return Err(WiringError::UnresolvedEntryPoint(UnresolvedEntryPointError {
                entry_point: ep.name.clone(),
                requested: ep.requested.clone(),
                resolved: ep.resolved.clone(),
            }));
        }
    }

    Ok(ComponentSpec {
        generated_name: format!("Generated{}", carrier.name()),
        carrier: carrier.clone(),
        entry_points,
        binds,
        factories,
    })
}

/// An unresolved *root* that is an entry-point type is reported as an
/// entry-point failure, not a generic missing dependency.
fn reclassify_entry_root(err: WiringError, entry_points: &[ResolvedEntryPoint]) -> WiringError {
    if let WiringError::UnresolvedDependency(ref unresolved) = err {
        if unresolved.required_by.is_none() {
            if let Some(ep) = entry_points.iter().find(|ep| ep.resolved == unresolved.requested) {
                return WiringError::UnresolvedEntryPoint(UnresolvedEntryPointError {
                    entry_point: ep.name.clone(),
                    requested: ep.requested.clone(),
                    resolved: ep.resolved.clone(),
                });
            }
        }
    }
    err
}
