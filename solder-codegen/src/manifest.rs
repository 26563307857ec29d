//! Declarative wiring manifests.
//!
//! A [`Manifest`] is the structured-configuration face of the Type
//! Catalog: the same metadata [`MemoryCatalog`] takes through builder
//! calls, read from a TOML document instead. Useful for build pipelines
//! that keep wiring declarations next to the build configuration rather
//! than in code.
//!
//! ```toml
//! [[injectable]]
//! type = "app::ConsoleSource"
//!
//! [[injectable]]
//! type = "app::Greeter"
//! params = ["app::MessageSource"]
//!
//! [[module]]
//! type = "app::Bindings"
//! bind = [{ requested = "app::MessageSource", provided = "app::ConsoleSource" }]
//!
//! [[component]]
//! type = "app::AppComponent"
//! modules = ["app::Bindings"]
//! entry_point = [{ name = "greeter", type = "app::Greeter" }]
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{BindingDirective, ConstructionSpec, EntryPoint, MemoryCatalog};
use crate::lifetime::Lifetime;
use crate::typeref::TypeRef;

/// Error reading a wiring manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to parse wiring manifest: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A complete wiring manifest.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "injectable")]
    injectables: Vec<InjectableDecl>,
    #[serde(default, rename = "module")]
    modules: Vec<ModuleDecl>,
    #[serde(default, rename = "component")]
    components: Vec<ComponentDecl>,
}

#[derive(Debug, Deserialize)]
struct InjectableDecl {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    params: Vec<String>,
    #[serde(default)]
    lifetime: LifetimeDecl,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LifetimeDecl {
    #[default]
    Transient,
    Shared,
}

impl From<LifetimeDecl> for Lifetime {
    fn from(decl: LifetimeDecl) -> Self {
        match decl {
            LifetimeDecl::Transient => Lifetime::Transient,
            LifetimeDecl::Shared => Lifetime::Shared,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModuleDecl {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    bind: Vec<BindDecl>,
}

#[derive(Debug, Deserialize)]
struct BindDecl {
    requested: String,
    provided: String,
}

#[derive(Debug, Deserialize)]
struct ComponentDecl {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    modules: Vec<String>,
    #[serde(default, rename = "entry_point")]
    entry_points: Vec<EntryDecl>,
}

#[derive(Debug, Deserialize)]
struct EntryDecl {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

impl Manifest {
    /// Parses a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(text)?;
        debug!(
            injectables = manifest.injectables.len(),
            modules = manifest.modules.len(),
            components = manifest.components.len(),
            "parsed wiring manifest"
        );
        Ok(manifest)
    }

    /// Converts the declarations into a queryable [`MemoryCatalog`].
    pub fn into_catalog(self) -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();

        for decl in self.injectables {
            let params = decl.params.iter().map(|p| TypeRef::parse(p)).collect();
            catalog = catalog.injectable(
                TypeRef::parse(&decl.ty),
                ConstructionSpec::new(params, decl.lifetime.into()),
            );
        }

        for decl in self.modules {
            let directives = decl
                .bind
                .iter()
                .map(|b| {
                    BindingDirective::new(TypeRef::parse(&b.requested), TypeRef::parse(&b.provided))
                })
                .collect();
            catalog = catalog.binding_module(TypeRef::parse(&decl.ty), directives);
        }

        for decl in self.components {
            let entry_points = decl
                .entry_points
                .iter()
                .map(|ep| EntryPoint::new(ep.name.clone(), TypeRef::parse(&ep.ty)))
                .collect();
            let modules = decl.modules.iter().map(|m| TypeRef::parse(m)).collect();
            catalog = catalog.component(TypeRef::parse(&decl.ty), entry_points, modules);
        }

        catalog
    }
}
