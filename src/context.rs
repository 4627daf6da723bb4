// Session-wide provider for the shared task store

use crate::store::TaskStore;
use eyre::{Result, eyre};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Shared handle to the session's store
pub type SharedStore = Rc<RefCell<TaskStore>>;

/// Owns the one `TaskStore` of an application session
///
/// Create it once at startup and hand out [`Scope`]s to the views that
/// need the store.
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    store: SharedStore,
}

impl TaskContext {
    pub fn new() -> Self {
        debug!("TaskContext: creating session store");
        Self::default()
    }

    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }

    /// A scope that resolves to this context's store
    pub fn scope(&self) -> Scope {
        Scope {
            store: Some(self.store()),
        }
    }
}

/// Where a view is mounted; may or may not sit under a `TaskContext`
#[derive(Debug, Clone, Default)]
pub struct Scope {
    store: Option<SharedStore>,
}

impl Scope {
    /// A scope with no provider
    pub fn detached() -> Self {
        Self::default()
    }
}

/// Resolve the store for a view
///
/// Fails when the scope has no provider. That is a wiring mistake, so
/// callers should treat the error as fatal.
pub fn use_tasks(scope: &Scope) -> Result<SharedStore> {
    scope
        .store
        .clone()
        .ok_or_else(|| eyre!("task store accessed outside of a TaskContext"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Task};
    use chrono::NaiveDate;

    #[test]
    fn test_scopes_share_one_store() {
        let ctx = TaskContext::new();
        let a = use_tasks(&ctx.scope()).unwrap();
        let b = use_tasks(&ctx.scope()).unwrap();

        let task = Task::new("shared", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), Category::Urgent).unwrap();
        a.borrow_mut().add_task(task);

        assert_eq!(b.borrow().len(), 1);
        assert_eq!(ctx.store().borrow().tasks()[0].text(), "shared");
    }

    #[test]
    fn test_detached_scope_is_an_error() {
        let err = use_tasks(&Scope::detached()).unwrap_err();
        assert!(err.to_string().contains("outside of a TaskContext"));
    }

    #[test]
    fn test_separate_contexts_are_independent() {
        let first = TaskContext::new();
        let second = TaskContext::new();

        let task = Task::new("only in first", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), Category::General).unwrap();
        first.store().borrow_mut().add_task(task);

        assert_eq!(first.store().borrow().len(), 1);
        assert!(second.store().borrow().is_empty());
    }
}
