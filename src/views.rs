// Presentation-side consumers of the task store

use crate::context::{Scope, SharedStore, use_tasks};
use crate::filter::{self, Filter};
use crate::models::{Category, Task, TaskId};
use chrono::NaiveDate;
use eyre::Result;
use std::collections::HashSet;
use tracing::{debug, info};

/// Tasks split by category, each group in store order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroups {
    pub urgent: Vec<Task>,
    pub general: Vec<Task>,
}

impl CategoryGroups {
    pub fn get(&self, category: Category) -> &[Task] {
        match category {
            Category::Urgent => &self.urgent,
            Category::General => &self.general,
        }
    }
}

/// Partition a snapshot into its Urgent and General tasks
pub fn partition_by_category(tasks: &[Task]) -> CategoryGroups {
    let (urgent, general): (Vec<Task>, Vec<Task>) = tasks
        .iter()
        .cloned()
        .partition(|t| t.category() == Category::Urgent);
    CategoryGroups { urgent, general }
}

/// Copy of the snapshot ordered by due date, ascending
///
/// Equal dates keep their insertion order.
pub fn sorted_by_due_date(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|t| t.due_date());
    sorted
}

// ============================================================================
// Grouped view
// ============================================================================

/// Read-only view of every task, grouped by category
pub struct GroupedView {
    store: SharedStore,
}

impl GroupedView {
    pub fn mount(scope: &Scope) -> Result<Self> {
        Ok(Self {
            store: use_tasks(scope)?,
        })
    }

    pub fn groups(&self) -> CategoryGroups {
        partition_by_category(self.store.borrow().tasks())
    }
}

// ============================================================================
// Editable view
// ============================================================================

/// Input state for a task that has not been submitted yet
#[derive(Debug, Clone, PartialEq)]
pub struct Composer {
    pub text: String,
    pub due_date: NaiveDate,
    pub category: Category,
    default_date: NaiveDate,
}

impl Composer {
    pub fn new(default_date: NaiveDate) -> Self {
        Self {
            text: String::new(),
            due_date: default_date,
            category: Category::default(),
            default_date,
        }
    }

    /// Date the composer falls back to when none is chosen
    pub fn default_date(&self) -> NaiveDate {
        self.default_date
    }

    fn reset(&mut self) {
        self.text.clear();
        self.due_date = self.default_date;
        self.category = Category::default();
    }
}

/// A displayed row of the editable view
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub task: Task,
    pub completed: bool,
}

/// Due-date-sorted list with a composer, removal and completion marks
///
/// Completion is tracked by this view alone and is lost when the view is
/// dropped.
pub struct EditableView {
    store: SharedStore,
    pub composer: Composer,
    completed: HashSet<TaskId>,
    displayed: Vec<TaskId>,
}

impl EditableView {
    pub fn mount(scope: &Scope, default_date: NaiveDate) -> Result<Self> {
        Ok(Self {
            store: use_tasks(scope)?,
            composer: Composer::new(default_date),
            completed: HashSet::new(),
            displayed: Vec::new(),
        })
    }

    /// Submit the composer. Blank text is silently rejected.
    pub fn submit(&mut self) -> Option<TaskId> {
        let task = match Task::new(&self.composer.text, self.composer.due_date, self.composer.category) {
            Ok(task) => task,
            Err(e) => {
                debug!(error = %e, "submit: rejected");
                return None;
            }
        };

        let id = self.store.borrow_mut().add_task(task);
        self.composer.reset();
        Some(id)
    }

    /// Rows matching `filters`, sorted by due date
    ///
    /// The returned order becomes the one [`EditableView::row_id`] resolves
    /// against.
    pub fn rows(&mut self, filters: &[Filter]) -> Vec<Row> {
        let store = self.store.borrow();
        self.completed.retain(|id| store.get(*id).is_some());

        let sorted = sorted_by_due_date(&filter::apply(store.tasks(), filters));
        self.displayed = sorted.iter().map(|t| t.id()).collect();

        sorted
            .into_iter()
            .map(|task| Row {
                completed: self.completed.contains(&task.id()),
                task,
            })
            .collect()
    }

    /// Id of the 1-based row number from the last call to `rows`
    pub fn row_id(&self, row: usize) -> Option<TaskId> {
        row.checked_sub(1).and_then(|i| self.displayed.get(i).copied())
    }

    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    /// Flip the completion mark of a task. Returns the new state.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        if self.store.borrow().get(id).is_none() {
            debug!(%id, "toggle_complete: unknown task id, ignoring");
            return false;
        }

        let completed = if self.completed.remove(&id) {
            false
        } else {
            self.completed.insert(id);
            true
        };
        info!(%id, completed, "Toggled completion");
        completed
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.store.borrow_mut().remove(id);
        if removed.is_some() {
            self.completed.remove(&id);
            self.displayed.retain(|d| *d != id);
        }
        removed
    }
}
