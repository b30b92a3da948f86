//! Task commands against the remote API.

use std::path::Path;

use anyhow::Result;

use taskdeck_task::{CreateTask, Task, TaskPriority, TaskStatus};

use crate::commands::{api_client, current_context, open_store};
use crate::config::ClientConfig;

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    println!("{:<6} {:<28} {:<12} {:<10} {}", "ID", "TITLE", "STATUS", "PRIORITY", "DUE");
    for task in tasks {
        let id = task
            .id
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<28} {:<12} {:<10} {}",
            id, task.title, task.status, task.priority, task.due_date
        );
    }
}

/// List all tasks, or only those assigned to the current user.
pub async fn list(assigned: bool, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let tasks = if assigned {
        client.assigned_tasks().await
    } else {
        client.list_tasks().await
    }
    .map_err(|e| anyhow::anyhow!("Failed to fetch tasks: {e}"))?;

    print_tasks(&tasks);
    Ok(())
}

/// Create a task.
#[allow(clippy::too_many_arguments)]
pub async fn create(
    title: &str,
    description: &str,
    due_date: &str,
    priority: &str,
    manager_id: i64,
    assignee_ids: &[i64],
    tags: &str,
    config_path: &Path,
) -> Result<()> {
    let priority = TaskPriority::from_str(priority)
        .ok_or_else(|| anyhow::anyhow!("Priority must be Low, Medium, or High."))?;

    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let created = client
        .create_task(&CreateTask {
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            priority,
            status: TaskStatus::ToDo,
            manager_id,
            assignee_ids: assignee_ids.to_vec(),
            tags: tags.to_string(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create task: {e}"))?;

    match created.id {
        Some(id) => println!("Created task {id}."),
        None => println!("Created task."),
    }
    Ok(())
}

/// Move a task to a new status.
pub async fn set_status(task_id: i64, status: &str, config_path: &Path) -> Result<()> {
    let status = TaskStatus::from_str(status).ok_or_else(|| {
        anyhow::anyhow!("Status must be \"To Do\", \"In Progress\", or \"Completed\".")
    })?;

    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let task = client
        .update_task_status(task_id, status)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update status: {e}"))?;
    println!("Task {} is now {}.", task_id, task.status);
    Ok(())
}
