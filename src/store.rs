// In-memory task store shared by every view of a session

use crate::models::{Task, TaskId};
use tracing::{debug, info};

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Task])>;

/// Ordered, in-memory collection of tasks
///
/// Insertion order is the canonical order. Every mutation that changes the
/// sequence notifies subscribers synchronously with the new snapshot.
#[derive(Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a task to the end of the sequence
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let id = task.id();
        debug!(%id, text = task.text(), category = %task.category(), "add_task: appending");
        self.tasks.push(task);
        self.notify();
        id
    }

    /// Remove the task at `index` in insertion order
    ///
    /// An out-of-range index removes nothing and notifies no one.
    pub fn remove_task(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            debug!(index, len = self.tasks.len(), "remove_task: index out of range, ignoring");
            return None;
        }

        let task = self.tasks.remove(index);
        info!(index, id = %task.id(), "Removed task");
        self.notify();
        Some(task)
    }

    /// Remove the task with the given id, if present
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        match self.position(id) {
            Some(index) => self.remove_task(index),
            None => {
                debug!(%id, "remove: unknown task id, ignoring");
                None
            }
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The current snapshot, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Position of a task in insertion order
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a callback invoked with the new snapshot after each mutation
    ///
    /// Callbacks run while the store is mutably borrowed, so they must not
    /// reach back into the store.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Task]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        debug!(subscription = id.0, "subscribe: registered");
        id
    }

    /// Drop a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let snapshot = &self.tasks;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(snapshot);
        }
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
