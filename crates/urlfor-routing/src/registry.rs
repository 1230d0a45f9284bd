//! Build-once holder for the route table.
//!
//! The table is built the first time it is needed and then handed out as an
//! `Arc<RouteTable>`. Concurrent first callers wait on the same build instead
//! of each walking the applications. [`RouteRegistry::rebuild`] forces a
//! fresh build, e.g. after applications are remounted.

use std::sync::{Arc, Mutex, RwLock};

use crate::table::RouteTable;
use crate::tree::Application;

/// Holds the route table behind a build-once guard.
pub struct RouteRegistry {
    build_lock: Mutex<()>,
    table: RwLock<Option<Arc<RouteTable>>>,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            build_lock: Mutex::new(()),
            table: RwLock::new(None),
        }
    }

    /// Returns the table, if it has been built.
    pub fn get(&self) -> Option<Arc<RouteTable>> {
        self.table.read().expect("route table lock poisoned").clone()
    }

    /// Returns the table, building it from `apps` if this is the first call.
    pub fn get_or_build(&self, apps: &[Application]) -> Arc<RouteTable> {
        if let Some(table) = self.get() {
            return table;
        }

        let _guard = self.build_lock.lock().expect("route build lock poisoned");
        // Another caller may have finished the build while we waited.
        if let Some(table) = self.get() {
            return table;
        }
        self.store(RouteTable::build(apps))
    }

    /// Builds a fresh table from `apps`, replacing any existing one.
    pub fn rebuild(&self, apps: &[Application]) -> Arc<RouteTable> {
        let _guard = self.build_lock.lock().expect("route build lock poisoned");
        tracing::debug!("forcing route table rebuild");
        self.store(RouteTable::build(apps))
    }

    /// Returns `true` once a table has been built.
    pub fn is_built(&self) -> bool {
        self.table.read().expect("route table lock poisoned").is_some()
    }

    fn store(&self, table: RouteTable) -> Arc<RouteTable> {
        let table = Arc::new(table);
        *self.table.write().expect("route table lock poisoned") = Some(Arc::clone(&table));
        table
    }
}

/// The process-wide registry.
pub static ROUTES: RouteRegistry = RouteRegistry::new();

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::signature::Signature;
    use crate::tree::{Controller, Handler};

    fn apps(handler: &str) -> Vec<Application> {
        vec![Application::tree(
            "",
            Controller::new("site.Root").handler(Handler::exposed(handler, Signature::new())),
        )]
    }

    #[test]
    fn test_get_before_build() {
        let registry = RouteRegistry::new();
        assert!(registry.get().is_none());
        assert!(!registry.is_built());
    }

    #[test]
    fn test_get_or_build_builds_once() {
        let registry = RouteRegistry::new();
        let first = registry.get_or_build(&apps("a"));
        let second = registry.get_or_build(&apps("b"));
        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.class_route("site.root.a").is_some());
        assert!(second.class_route("site.root.b").is_none());
    }

    #[test]
    fn test_rebuild_replaces_table() {
        let registry = RouteRegistry::new();
        registry.get_or_build(&apps("a"));
        let rebuilt = registry.rebuild(&apps("b"));
        assert!(rebuilt.class_route("site.root.b").is_some());
        assert!(registry.get().unwrap().class_route("site.root.a").is_none());
    }

    #[test]
    fn test_concurrent_callers_share_one_table() {
        let registry = Arc::new(RouteRegistry::new());
        let seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let seen = Arc::clone(&seen);
                thread::spawn(move || {
                    let table = registry.get_or_build(&apps("a"));
                    seen.fetch_add(1, Ordering::SeqCst);
                    Arc::as_ptr(&table) as usize
                })
            })
            .collect();

        let ptrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(seen.load(Ordering::SeqCst), 8);
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
    }
}
