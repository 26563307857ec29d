//! Basic example of Solder wiring generation.
//!
//! Declares a small application graph in a TOML manifest, generates both
//! the component-strategy container and the factory-strategy units, then
//! wires the same graph at runtime through an [`ObjectGraph`].

use solder::prelude::*;

const MANIFEST: &str = r#"
    [[injectable]]
    type = "app::ConsoleSource"

    [[injectable]]
    type = "app::Greeter"
    params = ["app::MessageSource"]

    [[injectable]]
    type = "app::Cache"
    lifetime = "shared"

    [[module]]
    type = "app::Bindings"
    bind = [{ requested = "app::MessageSource", provided = "app::ConsoleSource" }]

    [[component]]
    type = "app::AppComponent"
    modules = ["app::Bindings"]
    entry_point = [{ name = "greeter", type = "app::Greeter" }]
"#;

// === The application types the manifest describes ===

struct ConsoleSource;

impl ConsoleSource {
    fn new() -> Self {
        ConsoleSource
    }

    fn message(&self) -> String {
        "Hello from the console!".to_string()
    }
}

struct Greeter {
    source: ConsoleSource,
}

impl Greeter {
    fn new(source: ConsoleSource) -> Self {
        Greeter { source }
    }

    fn greet(&self) -> String {
        self.source.message()
    }
}

// === Factories shaped exactly like the generated factory units ===

struct ConsoleSourceFactory;

impl Factory<ConsoleSource> for ConsoleSourceFactory {
    fn get(&self, _graph: &ObjectGraph) -> ConsoleSource {
        ConsoleSource::new()
    }
}

struct GreeterFactory;

impl Factory<Greeter> for GreeterFactory {
    fn get(&self, graph: &ObjectGraph) -> Greeter {
        Greeter::new(graph.get())
    }
}

fn main() {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("solder=debug")
        .init();

    // === Generation: manifest in, source artifacts out ===
    let catalog = Manifest::from_toml(MANIFEST)
        .expect("manifest should parse")
        .into_catalog();
    let generator = Generator::new(&catalog);

    let components = generator.component_round(&[TypeRef::parse("app::AppComponent")]);
    let factories = generator.factory_round(&[
        TypeRef::parse("app::ConsoleSource"),
        TypeRef::parse("app::Greeter"),
        TypeRef::parse("app::Cache"),
    ]);

    for artifact in components.artifacts.iter().chain(&factories.artifacts) {
        println!("──── {} ────", artifact.file_name);
        println!("{}", artifact.contents);
    }
    assert!(components.is_clean() && factories.is_clean());
    println!("✅ Generated {} source units", components.artifacts.len() + factories.artifacts.len());

    // === Runtime: the factory-strategy units in action ===
    let graph = ObjectGraph::new();
    graph.register(ConsoleSourceFactory);
    graph.register(GreeterFactory);

    let greeter: Greeter = graph.get();
    println!("👋 {}", greeter.greet());

    // Transient wiring builds fresh instances per request
    let another: Greeter = graph.get();
    println!("👋 {}", another.greet());

    println!("🎉 Wiring works!");
}
