//! The runtime lookup registry used by factory-strategy wiring.
//!
//! An [`ObjectGraph`] maps types to [`Factory`] values and resolves
//! constructor parameters by type at call time. Shared instances cache
//! inside the graph itself and two graphs never exchange instances,
//! which is the [`SharePolicy::GraphScoped`] policy
//! ([`ObjectGraph::SHARE_POLICY`]).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::key::TypeKey;
use crate::shared::SharePolicy;

/// A generated factory: builds one `T`, resolving parameters against the
/// graph it is handed.
pub trait Factory<T>: Send + Sync {
    fn get(&self, graph: &ObjectGraph) -> T;
}

/// Type-erased factory entry.
///
/// `Arc` rather than `Box` so a lookup can clone the entry out and invoke
/// it after the map shard is released; factories re-enter the graph to
/// resolve their own parameters.
type ErasedFactory = Arc<dyn Fn(&ObjectGraph) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Thread-safe runtime registry of factories and per-graph shared
/// instances.
///
/// # Examples
/// ```
/// use solder_runtime::graph::{Factory, ObjectGraph};
///
/// struct Greeting(String);
///
/// struct GreetingFactory;
/// impl Factory<Greeting> for GreetingFactory {
///     fn get(&self, _graph: &ObjectGraph) -> Greeting {
///         Greeting("hello".to_string())
///     }
/// }
///
/// let graph = ObjectGraph::new();
/// graph.register(GreetingFactory);
/// let greeting: Greeting = graph.get();
/// assert_eq!(greeting.0, "hello");
/// ```
#[derive(Default)]
pub struct ObjectGraph {
    factories: DashMap<TypeKey, ErasedFactory>,
    cells: Mutex<HashMap<TypeKey, Arc<OnceCell<Box<dyn Any + Send + Sync>>>>>,
}

impl ObjectGraph {
    /// The sharing scope of every cache in this registry.
    pub const SHARE_POLICY: SharePolicy = SharePolicy::GraphScoped;

    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for `T`. A second registration for the same
    /// type replaces the first.
    pub fn register<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Factory<T> + 'static,
    {
        let key = TypeKey::of::<T>();
        debug!(key = %key, "factory registered");
        self.factories.insert(
            key,
            Arc::new(move |graph| Box::new(factory.get(graph)) as Box<dyn Any + Send + Sync>),
        );
    }

    /// Resolves a `T` through its registered factory.
    ///
    /// # Errors
    /// [`GraphError::NotRegistered`] when no factory covers `T`.
    pub fn try_get<T: Send + Sync + 'static>(&self) -> Result<T> {
        let key = TypeKey::of::<T>();
        trace!(key = %key, "resolving");

        let factory = self
            .factories
            .get(&key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(GraphError::NotRegistered { key })?;

        // the shard guard is gone here, so the factory may re-enter
        // this graph for its own parameters
        let boxed = factory(self);
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| GraphError::TypeMismatch { key })
    }

    /// Resolves a `T`, panicking with the rendered [`GraphError`] when no
    /// factory covers it.
    ///
    /// Generated wiring is validated complete at generation time, so a
    /// miss here is a wiring bug at the registration site. Use
    /// [`try_get`](ObjectGraph::try_get) when completeness is not known.
    pub fn get<T: Send + Sync + 'static>(&self) -> T {
        match self.try_get() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the graph-scoped shared instance of `T`, building it on
    /// first use.
    ///
    /// Exactly-once per graph: concurrent first callers race, one
    /// builder runs, the rest block for its value. Separate graphs keep
    /// separate caches.
    pub fn shared<T, B>(&self, build: B) -> T
    where
        T: Clone + Send + Sync + 'static,
        B: FnOnce(&ObjectGraph) -> T,
    {
        let key = TypeKey::of::<T>();
        let cell = {
            let mut cells = self.cells.lock();
            cells
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        // builder runs outside the index lock so it can resolve its own
        // parameters through this graph
        let boxed = cell.get_or_init(|| {
            trace!(key = %key, policy = %Self::SHARE_POLICY, "building shared instance");
            Box::new(build(self)) as Box<dyn Any + Send + Sync>
        });

        match boxed.downcast_ref::<T>() {
            Some(value) => value.clone(),
            // the cell is keyed by T's TypeKey, so only a TypeId
            // collision could land here
            None => panic!("shared cell for {key} holds a value of a different type"),
        }
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ObjectGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectGraph")
            .field("factories", &self.factories.len())
            .field("shared_cells", &self.cells.lock().len())
            .finish()
    }
}
