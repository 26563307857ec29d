//! The sharing primitive — lazy, exactly-once instance caching.
//!
//! Generated wiring uses [`Shared`] wherever a type is long-lived. The
//! first [`acquire`](Shared::acquire) on a cell evaluates the builder and
//! caches the result for the lifetime of the cell's owner; every later
//! call clones the cached value and the builder never runs again. Under
//! concurrent first access the builder still runs exactly once, and the
//! losers block until the winner's value lands.
//!
//! Which value owns the cell is an explicit [`SharePolicy`], not a side
//! effect of which emitter produced the code.

use std::fmt;

use once_cell::sync::OnceCell;

/// Who owns a shared instance's cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharePolicy {
    /// The cell lives inside one generated container value; each
    /// container instance caches independently.
    ContainerScoped,

    /// The cache lives inside the [`ObjectGraph`](crate::graph::ObjectGraph)
    /// passed at call time; each graph instance caches independently.
    GraphScoped,
}

impl fmt::Display for SharePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharePolicy::ContainerScoped => write!(f, "ContainerScoped"),
            SharePolicy::GraphScoped => write!(f, "GraphScoped"),
        }
    }
}

/// A lazy-compute-once cell for one shared instance.
pub struct Shared<T> {
    policy: SharePolicy,
    cell: OnceCell<T>,
}

impl<T: Clone> Shared<T> {
    /// Creates an empty cell owned under the given policy.
    pub fn new(policy: SharePolicy) -> Self {
        Self {
            policy,
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, evaluating `build` on first use.
    ///
    /// Exactly-once: concurrent first callers race to run `build`, one
    /// wins, the rest block and receive the winner's value.
    pub fn acquire(&self, build: impl FnOnce() -> T) -> T {
        self.cell.get_or_init(build).clone()
    }

    /// The owning scope this cell was declared with.
    pub fn policy(&self) -> SharePolicy {
        self.policy
    }

    /// `true` once a value has been cached.
    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("policy", &self.policy)
            .field("filled", &self.cell.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn builder_runs_once() {
        let calls = AtomicU32::new(0);
        let cell = Shared::new(SharePolicy::ContainerScoped);

        let first: u32 = cell.acquire(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            7
        });
        let second: u32 = cell.acquire(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            99
        });

        assert_eq!(first, 7);
        assert_eq!(second, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cached_value_is_shared() {
        let cell: Shared<Arc<String>> = Shared::new(SharePolicy::GraphScoped);
        let a = cell.acquire(|| Arc::new("hello".to_string()));
        let b = cell.acquire(|| Arc::new("other".to_string()));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn policy_is_recorded() {
        let cell: Shared<u8> = Shared::new(SharePolicy::GraphScoped);
        assert_eq!(cell.policy(), SharePolicy::GraphScoped);
        assert!(!cell.is_filled());
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let cell: Arc<Shared<u64>> = Arc::new(Shared::new(SharePolicy::GraphScoped));
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let calls = calls.clone();
                let cell = cell.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    cell.acquire(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        42
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_shows_fill_state() {
        let cell: Shared<u8> = Shared::new(SharePolicy::ContainerScoped);
        assert!(format!("{cell:?}").contains("filled: false"));
        cell.acquire(|| 1);
        assert!(format!("{cell:?}").contains("filled: true"));
    }
}
