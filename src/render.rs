// Text rendering for the terminal session

use crate::models::{Category, Task};
use crate::views::{CategoryGroups, Row};
use chrono::NaiveDate;
use colored::Colorize;
use std::fmt::Write;

/// Format a due date the way rows display it, e.g. `05 Jan 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn category_label(category: Category) -> String {
    match category {
        Category::Urgent => category.as_str().red().bold().to_string(),
        Category::General => category.as_str().green().bold().to_string(),
    }
}

/// Render the grouped view: Urgent first, then General
pub fn render_groups(groups: &CategoryGroups) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let heading = format!("{} Tasks", category);
        let _ = writeln!(out, "{}", heading.blue().bold());

        let tasks = groups.get(category);
        if tasks.is_empty() {
            let empty = format!("  No {} tasks.", category.as_str().to_lowercase());
            let _ = writeln!(out, "{}", empty.italic().dimmed());
            continue;
        }

        for task in tasks {
            let _ = writeln!(out, "  {}  Due: {}", task.text(), format_date(task.due_date()));
        }
    }
    out
}

/// Render the editable view as numbered rows
pub fn render_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return format!("{}\n", "No tasks yet.".italic().dimmed());
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let text = if row.completed {
            format!(
                "{} {}",
                row.task.text().strikethrough().dimmed(),
                "(Completed)".blue().bold()
            )
        } else {
            row.task.text().to_string()
        };

        let _ = writeln!(
            out,
            "{:>3}. {}  Due: {}  {}",
            i + 1,
            text,
            format_date(row.task.due_date()),
            category_label(row.task.category())
        );
    }
    out
}

/// One-line confirmation after adding a task
pub fn render_added(task: &Task) -> String {
    format!(
        "Added \"{}\" (due {}, {})",
        task.text(),
        format_date(task.due_date()),
        category_label(task.category())
    )
}
