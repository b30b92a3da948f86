//! Pure filter/search/sort/aggregate functions over todo slices.
//!
//! None of these touch storage; the store's `list` applies the comparator
//! and the view layers call the rest on whatever slice they hold.

use std::cmp::Ordering;

use crate::model::{Todo, TodoFilter, TodoStats};

/// Two-key list order: items with a due date first (ascending due date),
/// then items without one, newest-created first. Equal due dates also
/// tie-break on creation time, newest first.
///
/// Both keys are ISO-8601 strings in a single format, so byte order is
/// date order.
pub fn due_date_then_created(a: &Todo, b: &Todo) -> Ordering {
    match (&a.due_date, &b.due_date) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(da), Some(db)) => da.cmp(db).then_with(|| b.created_at.cmp(&a.created_at)),
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}

/// Keep the todos matching a completion filter.
pub fn filter_todos(todos: &[Todo], filter: TodoFilter) -> Vec<Todo> {
    match filter {
        TodoFilter::Completed => todos.iter().filter(|t| t.completed).cloned().collect(),
        TodoFilter::Pending => todos.iter().filter(|t| !t.completed).cloned().collect(),
        TodoFilter::All => todos.to_vec(),
    }
}

/// Case-insensitive substring search against title OR description.
/// An empty or whitespace-only term returns the input unchanged.
pub fn search_todos(todos: &[Todo], term: &str) -> Vec<Todo> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return todos.to_vec();
    }
    todos
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&term)
                || t.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Aggregate counts.
pub fn stats(todos: &[Todo]) -> TodoStats {
    let completed = todos.iter().filter(|t| t.completed).count();
    TodoStats {
        total: todos.len(),
        completed,
        pending: todos.len() - completed,
    }
}
