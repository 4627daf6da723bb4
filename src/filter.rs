// Filter types for narrowing a task snapshot

use crate::models::{Category, Task};
use chrono::NaiveDate;
use eyre::{Result, eyre};
use std::cmp::Ordering;

/// A single condition on a task. Multiple filters combine with AND.
///
/// Text comparisons are case-insensitive; the needle is lowercased once
/// when the filter is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    op: FilterOp,
    value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
}

/// The value a filter compares against; its variant selects the task field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Category(Category),
    DueDate(NaiveDate),
    Text(String),
}

impl FilterOp {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Ne => ordering != Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Contains => false,
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::Contains => "contains",
        };
        write!(f, "{}", s)
    }
}

impl Filter {
    /// Build a filter, rejecting operator/value pairs that make no sense
    pub fn new(op: FilterOp, value: FilterValue) -> Result<Self> {
        let valid = match (&value, op) {
            (FilterValue::Category(_), FilterOp::Eq | FilterOp::Ne) => true,
            (FilterValue::Category(_), _) => false,
            (FilterValue::DueDate(_), FilterOp::Contains) => false,
            (FilterValue::DueDate(_), _) => true,
            (FilterValue::Text(_), FilterOp::Eq | FilterOp::Ne | FilterOp::Contains) => true,
            (FilterValue::Text(_), _) => false,
        };
        if !valid {
            return Err(eyre!("Operator '{}' cannot be used with {:?}", op, value));
        }
        let value = match value {
            FilterValue::Text(s) => FilterValue::Text(s.to_lowercase()),
            other => other,
        };
        Ok(Self { op, value })
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    pub fn category(category: Category) -> Self {
        Self {
            op: FilterOp::Eq,
            value: FilterValue::Category(category),
        }
    }

    pub fn due_on_or_before(date: NaiveDate) -> Self {
        Self {
            op: FilterOp::Lte,
            value: FilterValue::DueDate(date),
        }
    }

    pub fn due_after(date: NaiveDate) -> Self {
        Self {
            op: FilterOp::Gt,
            value: FilterValue::DueDate(date),
        }
    }

    /// Case-insensitive substring match on the task text
    pub fn text_contains(needle: &str) -> Self {
        Self {
            op: FilterOp::Contains,
            value: FilterValue::Text(needle.to_lowercase()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match &self.value {
            FilterValue::Category(category) => self.op.accepts(if task.category() == *category {
                Ordering::Equal
            } else {
                Ordering::Less
            }),
            FilterValue::DueDate(date) => self.op.accepts(task.due_date().cmp(date)),
            FilterValue::Text(needle) => {
                let haystack = task.text().to_lowercase();
                match self.op {
                    FilterOp::Contains => haystack.contains(needle.as_str()),
                    op => op.accepts(haystack.as_str().cmp(needle.as_str())),
                }
            }
        }
    }
}

/// Copy the tasks matching every filter, preserving their relative order
pub fn apply(tasks: &[Task], filters: &[Filter]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filters.iter().all(|f| f.matches(task)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new("Buy milk", date(2025, 1, 10), Category::General).unwrap(),
            Task::new("File taxes", date(2025, 1, 5), Category::Urgent).unwrap(),
            Task::new("Call plumber", date(2025, 1, 7), Category::Urgent).unwrap(),
        ]
    }

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let tasks = sample();
        assert_eq!(apply(&tasks, &[]), tasks);
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let tasks = sample();
        let urgent = apply(&tasks, &[Filter::category(Category::Urgent)]);
        assert_eq!(texts(&urgent), vec!["File taxes", "Call plumber"]);
    }

    #[test]
    fn test_due_date_filters() {
        let tasks = sample();
        let early = apply(&tasks, &[Filter::due_on_or_before(date(2025, 1, 7))]);
        assert_eq!(texts(&early), vec!["File taxes", "Call plumber"]);

        let late = apply(&tasks, &[Filter::due_after(date(2025, 1, 7))]);
        assert_eq!(texts(&late), vec!["Buy milk"]);
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let tasks = sample();
        let found = apply(&tasks, &[Filter::text_contains("TAX")]);
        assert_eq!(texts(&found), vec!["File taxes"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let tasks = sample();
        let found = apply(
            &tasks,
            &[
                Filter::category(Category::Urgent),
                Filter::due_after(date(2025, 1, 5)),
            ],
        );
        assert_eq!(texts(&found), vec!["Call plumber"]);
    }

    #[test]
    fn test_filter_new_rejects_nonsense() {
        assert!(Filter::new(FilterOp::Gt, FilterValue::Category(Category::Urgent)).is_err());
        assert!(Filter::new(FilterOp::Contains, FilterValue::DueDate(date(2025, 1, 1))).is_err());
        assert!(Filter::new(FilterOp::Ne, FilterValue::Category(Category::Urgent)).is_ok());
    }

    #[test]
    fn test_category_ne() {
        let tasks = sample();
        let filter = Filter::new(FilterOp::Ne, FilterValue::Category(Category::Urgent)).unwrap();
        assert_eq!(texts(&apply(&tasks, &[filter])), vec!["Buy milk"]);
    }

    #[test]
    fn test_text_needle_is_normalized_at_construction() {
        let built = Filter::new(FilterOp::Contains, FilterValue::Text("MiLK".to_string())).unwrap();
        assert_eq!(built.value(), &FilterValue::Text("milk".to_string()));
        assert_eq!(built, Filter::text_contains("milk"));
        assert_eq!(built.op(), FilterOp::Contains);

        let tasks = sample();
        assert_eq!(texts(&apply(&tasks, &[built])), vec!["Buy milk"]);

        let exact = Filter::new(FilterOp::Eq, FilterValue::Text("BUY MILK".to_string())).unwrap();
        assert_eq!(texts(&apply(&tasks, &[exact])), vec!["Buy milk"]);
    }

    #[test]
    fn test_invalid_pairs_cannot_be_built() {
        // Ordering a category is rejected rather than silently matching
        assert!(Filter::new(FilterOp::Gt, FilterValue::Category(Category::General)).is_err());
        assert!(Filter::new(FilterOp::Lt, FilterValue::Text("a".to_string())).is_err());
    }

    #[test]
    fn test_filter_op_display() {
        assert_eq!(FilterOp::Eq.to_string(), "=");
        assert_eq!(FilterOp::Lte.to_string(), "<=");
        assert_eq!(FilterOp::Contains.to_string(), "contains");
    }
}
