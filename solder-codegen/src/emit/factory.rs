//! Factory-strategy emitter.
//!
//! Renders one standalone factory unit per constructable type,
//! independent of any component graph. Constructor parameters are fetched
//! at runtime with `graph.get()`: whatever the registry resolves for the
//! parameter type at call time wins, so binding substitution is implicit
//! and deferred. Shared types construct through `graph.shared(..)`; the
//! cache belongs to the `ObjectGraph` passed to `get`
//! (`SharePolicy::GraphScoped`), never to the factory value itself.
//!
//! The unit is expected to be included alongside the type's own module,
//! so the target type is referenced by its simple name without an import.

use tracing::debug;

use solder_support::ident::snake_case;

use crate::catalog::TypeCatalog;
use crate::emit::Artifact;
use crate::error::{MultipleConstructionEntriesError, Result, WiringError};
use crate::graph::unresolved_error;
use crate::typeref::TypeRef;

/// Renders the standalone factory unit for one constructable type.
///
/// # Errors
/// - [`WiringError::MultipleConstructionEntries`] — the type declares
///   more than one construction entry
/// - [`WiringError::UnresolvedDependency`] — the type declares none
pub fn emit_factory<C: TypeCatalog>(catalog: &C, ty: &TypeRef) -> Result<Artifact> {
    let specs = catalog.construction_specs_of(ty);
    let spec = match specs.as_slice() {
        [spec] => spec,
        [] => {
            return Err(WiringError::UnresolvedDependency(unresolved_error(
                catalog,
                ty.clone(),
                None,
            )));
        }
        _ => {
            return Err(WiringError::MultipleConstructionEntries(
                MultipleConstructionEntriesError {
                    ty: ty.clone(),
                    count: specs.len(),
                },
            ));
        }
    };

    let name = ty.name();
    let factory_name = format!("{name}Factory");
    let file_name = format!("{}_factory.rs", snake_case(name));

    let mut out = String::new();
    out.push_str("use solder_runtime::{Factory, ObjectGraph};\n\n");
    out.push_str(&format!("pub struct {factory_name};\n\n"));
    out.push_str(&format!("impl Factory<{name}> for {factory_name} {{\n"));

    if spec.lifetime.is_shared() {
        // cache lives in the graph passed at call time, one entry per graph
        let closure_arg = if spec.params.is_empty() { "_" } else { "g" };
        let construction = construction_call(name, spec.params.len(), "g.get()");
        out.push_str(&format!("    fn get(&self, graph: &ObjectGraph) -> {name} {{\n"));
        out.push_str(&format!(
            "        graph.shared(|{closure_arg}| {construction})\n"
        ));
    } else {
        let graph_arg = if spec.params.is_empty() { "_graph" } else { "graph" };
        let construction = construction_call(name, spec.params.len(), "graph.get()");
        out.push_str(&format!(
            "    fn get(&self, {graph_arg}: &ObjectGraph) -> {name} {{\n"
        ));
        out.push_str(&format!("        {construction}\n"));
    }

    out.push_str("    }\n");
    out.push_str("}\n");

    debug!(file = %file_name, ty = %ty, "emitted factory unit");
    Ok(Artifact {
        file_name,
        contents: out,
    })
}

fn construction_call(type_name: &str, param_count: usize, lookup: &str) -> String {
    let args = vec![lookup; param_count].join(", ");
    format!("{type_name}::new({args})")
}
