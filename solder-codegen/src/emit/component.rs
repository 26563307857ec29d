//! Component-strategy emitter.
//!
//! Renders one container type per [`ComponentSpec`]. Every factory
//! becomes a private `provide_*` method; shared factories construct
//! inside a [`Shared`] cell field scoped to the container value
//! (`SharePolicy::ContainerScoped`). Entry points become public accessors
//! delegating to the provider of their substituted type; constructor
//! arguments always reference the provided type's accessor, never the
//! requested abstraction.

use tracing::debug;

use solder_support::ident::snake_case;

use crate::component::ComponentSpec;
use crate::emit::Artifact;
use crate::graph::FactorySpec;

/// Renders the container source unit for one resolved component.
///
/// Pure function of the spec; the output is byte-stable.
pub fn emit_component(spec: &ComponentSpec) -> Artifact {
    let file_name = format!("generated_{}.rs", snake_case(spec.carrier.name()));
    let has_shared = spec.factories.iter().any(|f| f.lifetime.is_shared());

    let mut out = String::new();

    let imports = collect_imports(spec, has_shared);
    for import in &imports {
        out.push_str(&format!("use {import};\n"));
    }
    if !imports.is_empty() {
        out.push('\n');
    }

    render_struct(&mut out, spec, has_shared);
    out.push('\n');
    render_impl(&mut out, spec, has_shared);

    debug!(file = %file_name, factories = spec.factories.len(), "emitted component unit");
    Artifact {
        file_name,
        contents: out,
    }
}

/// `use` lines for every factory type outside the carrier's module, plus
/// the runtime sharing imports when some factory is shared. Sorted, so
/// emission order never depends on map iteration.
fn collect_imports(spec: &ComponentSpec, has_shared: bool) -> Vec<String> {
    let mut imports: Vec<String> = spec
        .factories
        .iter()
        .filter(|f| !f.ty.module().is_empty() && f.ty.module() != spec.carrier.module())
        .map(|f| f.ty.qualified())
        .collect();

    if has_shared {
        imports.push("solder_runtime::{SharePolicy, Shared}".to_string());
    }

    imports.sort();
    imports.dedup();
    imports
}

fn render_struct(out: &mut String, spec: &ComponentSpec, has_shared: bool) {
    if !has_shared {
        out.push_str(&format!("pub struct {};\n", spec.generated_name));
        return;
    }

    out.push_str(&format!("pub struct {} {{\n", spec.generated_name));
    for factory in shared_factories(spec) {
        out.push_str(&format!(
            "    {}: Shared<{}>,\n",
            cell_field(factory),
            factory.ty.name(),
        ));
    }
    out.push_str("}\n");
}

fn render_impl(out: &mut String, spec: &ComponentSpec, has_shared: bool) {
    out.push_str(&format!("impl {} {{\n", spec.generated_name));

    // constructor
    out.push_str("    pub fn new() -> Self {\n");
    if has_shared {
        out.push_str("        Self {\n");
        for factory in shared_factories(spec) {
            out.push_str(&format!(
                "            {}: Shared::new(SharePolicy::ContainerScoped),\n",
                cell_field(factory),
            ));
        }
        out.push_str("        }\n");
    } else {
        out.push_str("        Self\n");
    }
    out.push_str("    }\n");

    // one provider per factory, in discovery order
    for factory in &spec.factories {
        let args: Vec<String> = factory
            .params
            .iter()
            .map(|p| format!("self.provide_{}()", snake_case(p.name())))
            .collect();
        let construction = format!("{}::new({})", factory.ty.name(), args.join(", "));

        out.push('\n');
        out.push_str(&format!(
            "    fn provide_{}(&self) -> {} {{\n",
            snake_case(factory.ty.name()),
            factory.ty.name(),
        ));
        if factory.lifetime.is_shared() {
            out.push_str(&format!(
                "        self.{}.acquire(|| {construction})\n",
                cell_field(factory),
            ));
        } else {
            out.push_str(&format!("        {construction}\n"));
        }
        out.push_str("    }\n");
    }

    // public entry-point accessors delegate to the substituted provider
    for ep in &spec.entry_points {
        out.push('\n');
        out.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            ep.name,
            ep.resolved.name(),
        ));
        out.push_str(&format!(
            "        self.provide_{}()\n",
            snake_case(ep.resolved.name()),
        ));
        out.push_str("    }\n");
    }

    out.push_str("}\n");
}

fn shared_factories(spec: &ComponentSpec) -> impl Iterator<Item = &FactorySpec> {
    spec.factories.iter().filter(|f| f.lifetime.is_shared())
}

fn cell_field(factory: &FactorySpec) -> String {
    format!("{}_cell", snake_case(factory.ty.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BindingDirective, ConstructionSpec, EntryPoint, MemoryCatalog};
    use crate::component::resolve_component;
    use crate::typeref::TypeRef;

    fn ty(name: &str) -> TypeRef {
        TypeRef::parse(name)
    }

    fn greeter_spec() -> ComponentSpec {
        let catalog = MemoryCatalog::new()
            .injectable(
                ty("app::Greeter"),
                ConstructionSpec::transient(vec![ty("app::MessageSource")]),
            )
            .injectable(ty("app::ConsoleSource"), ConstructionSpec::transient(vec![]))
            .binding_module(
                ty("app::Binds"),
                vec![BindingDirective::new(
                    ty("app::MessageSource"),
                    ty("app::ConsoleSource"),
                )],
            )
            .component(
                ty("app::AppComponent"),
                vec![EntryPoint::new("greeter", ty("app::Greeter"))],
                vec![ty("app::Binds")],
            );
        resolve_component(&catalog, &ty("app::AppComponent")).unwrap()
    }

    #[test]
    fn deterministic_file_name() {
        let artifact = emit_component(&greeter_spec());
        assert_eq!(artifact.file_name, "generated_app_component.rs");
    }

    #[test]
    fn construction_references_provided_type_only() {
        let artifact = emit_component(&greeter_spec());
        assert!(artifact.contents.contains("Greeter::new(self.provide_console_source())"));
        // the requested abstraction never appears in emitted code
        assert!(!artifact.contents.contains("MessageSource"));
    }

    #[test]
    fn entry_point_accessor_delegates() {
        let artifact = emit_component(&greeter_spec());
        assert!(artifact.contents.contains("pub fn greeter(&self) -> Greeter {"));
        assert!(artifact.contents.contains("self.provide_greeter()"));
    }

    #[test]
    fn no_shared_factories_emits_unit_struct() {
        let artifact = emit_component(&greeter_spec());
        assert!(artifact.contents.contains("pub struct GeneratedAppComponent;"));
        assert!(!artifact.contents.contains("Shared"));
    }

    #[test]
    fn emission_is_byte_stable() {
        let spec = greeter_spec();
        assert_eq!(emit_component(&spec), emit_component(&spec));
    }

    #[test]
    fn shared_factory_gets_container_scoped_cell() {
        let catalog = MemoryCatalog::new()
            .injectable(ty("app::Cache"), ConstructionSpec::shared(vec![]))
            .injectable(
                ty("app::ReaderUseCase"),
                ConstructionSpec::transient(vec![ty("app::Cache")]),
            )
            .component(
                ty("app::AppComponent"),
                vec![EntryPoint::new("reader", ty("app::ReaderUseCase"))],
                vec![],
            );
        let spec = resolve_component(&catalog, &ty("app::AppComponent")).unwrap();

        let artifact = emit_component(&spec);
        assert!(artifact.contents.contains("cache_cell: Shared<Cache>,"));
        assert!(artifact
            .contents
            .contains("cache_cell: Shared::new(SharePolicy::ContainerScoped),"));
        assert!(artifact
            .contents
            .contains("self.cache_cell.acquire(|| Cache::new())"));
    }

    #[test]
    fn cross_module_types_imported_sorted() {
        let catalog = MemoryCatalog::new()
            .injectable(
                ty("app::Greeter"),
                ConstructionSpec::transient(vec![ty("data::LocalSource")]),
            )
            .injectable(ty("data::LocalSource"), ConstructionSpec::transient(vec![]))
            .component(
                ty("app::AppComponent"),
                vec![EntryPoint::new("greeter", ty("app::Greeter"))],
                vec![],
            );
        let spec = resolve_component(&catalog, &ty("app::AppComponent")).unwrap();

        let artifact = emit_component(&spec);
        assert!(artifact.contents.starts_with("use data::LocalSource;\n"));
        // same-module types need no import
        assert!(!artifact.contents.contains("use app::Greeter;"));
    }
}
