// tasklist - In-memory to-do list with grouped and due-date views

pub mod context;
pub mod filter;
pub mod models;
pub mod render;
pub mod session;
pub mod store;
pub mod views;

// Re-export main types for convenience
pub use context::{Scope, SharedStore, TaskContext, use_tasks};
pub use filter::{Filter, FilterOp, FilterValue};
pub use models::{Category, Task, TaskId};
pub use session::{Reply, Session, SessionConfig};
pub use store::{SubscriptionId, TaskStore};
pub use views::{CategoryGroups, Composer, EditableView, GroupedView, Row};
