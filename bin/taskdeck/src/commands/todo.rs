//! Local todo commands. Everything here stays inside the profile's
//! key-value store — no network.

use std::path::Path;

use anyhow::Result;

use taskdeck_todo::{
    Accounts, LoginRequest, SignupRequest, Todo, TodoFilter, TodoRequest, TodoStore,
    filter_todos, routes, search_todos,
};

use crate::commands::{current_context, open_store};
use crate::config::ClientConfig;

fn stores(config_path: &Path) -> Result<(Accounts, TodoStore)> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    Ok((Accounts::new(kv.clone()), TodoStore::new(kv)))
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos.");
        return;
    }
    for todo in todos {
        let mark = if todo.completed { "x" } else { " " };
        let due = todo.due_date.as_deref().unwrap_or("-");
        println!("[{mark}] {}  {:<28} due: {due}", todo.id, todo.title);
    }
}

/// Register a local account.
pub fn signup(full_name: &str, email: &str, password: &str, config_path: &Path) -> Result<()> {
    let (accounts, _) = stores(config_path)?;
    accounts
        .signup(SignupRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| anyhow::anyhow!("Signup failed: {e}"))?;
    println!("User registered successfully. Log in with `taskdeck todo login`.");
    Ok(())
}

/// Log in to the local account.
pub fn login(email: &str, password: &str, config_path: &Path) -> Result<()> {
    let (accounts, _) = stores(config_path)?;
    let user = accounts
        .login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| anyhow::anyhow!("Login failed: {e}"))?;
    println!("Logged in as {}.", user.full_name);
    Ok(())
}

/// Log out of the local account.
pub fn logout(config_path: &Path) -> Result<()> {
    let (accounts, _) = stores(config_path)?;
    accounts.logout().map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Logged out.");
    Ok(())
}

/// List the session's todos, optionally filtered and searched.
pub async fn list(filter: &str, search: Option<&str>, config_path: &Path) -> Result<()> {
    let filter = match filter {
        "all" => TodoFilter::All,
        "pending" => TodoFilter::Pending,
        "completed" => TodoFilter::Completed,
        other => anyhow::bail!("Unknown filter \"{other}\" (all, pending, completed)."),
    };

    let (accounts, store) = stores(config_path)?;
    let user = accounts
        .require_session()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let todos = store.list(&user).await.map_err(|e| anyhow::anyhow!("{e}"))?;
    let todos = filter_todos(&todos, filter);
    let todos = match search {
        Some(term) => search_todos(&todos, term),
        None => todos,
    };
    print_todos(&todos);
    Ok(())
}

/// Add a todo.
pub async fn add(
    title: &str,
    description: Option<&str>,
    due_date: Option<&str>,
    config_path: &Path,
) -> Result<()> {
    let (accounts, store) = stores(config_path)?;
    let user = accounts
        .require_session()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let todo = store
        .create(
            &user,
            TodoRequest {
                title: title.to_string(),
                description: description.map(str::to_string),
                due_date: due_date.map(str::to_string),
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Added {}.", todo.id);
    Ok(())
}

/// Toggle a todo's completion.
pub async fn toggle(id: &str, config_path: &Path) -> Result<()> {
    let (_, store) = stores(config_path)?;
    let todo = store
        .toggle_completion(id)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let state = if todo.completed { "completed" } else { "pending" };
    println!("{} is now {state}.", todo.title);
    Ok(())
}

/// Delete a todo.
pub async fn remove(id: &str, config_path: &Path) -> Result<()> {
    let (_, store) = stores(config_path)?;
    store.delete(id).await.map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Deleted {id}.");
    Ok(())
}

/// Show aggregate counts for the session's todos.
pub async fn stats(config_path: &Path) -> Result<()> {
    let (accounts, store) = stores(config_path)?;
    let user = accounts
        .require_session()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let s = store
        .stats_for(&user)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("total: {}  completed: {}  pending: {}", s.total, s.completed, s.pending);
    Ok(())
}

/// Resolve a path through the todo app's route guard and report where
/// the UI would land.
pub fn open(path: &str, config_path: &Path) -> Result<()> {
    let (accounts, _) = stores(config_path)?;
    let route = routes::resolve(&accounts, path).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{}", route.path());
    Ok(())
}

/// Remove all of the session's todos.
pub async fn clear(config_path: &Path) -> Result<()> {
    let (accounts, store) = stores(config_path)?;
    let user = accounts
        .require_session()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    store
        .clear_all(&user)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("Cleared.");
    Ok(())
}
