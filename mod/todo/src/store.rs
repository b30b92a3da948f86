use std::sync::Arc;

use tracing::{debug, warn};

use taskdeck_core::{new_id, now_rfc3339};
use taskdeck_kv::KVStore;

use crate::TodoError;
use crate::model::{LocalUser, Todo, TodoPatch, TodoRequest, TodoStats};
use crate::query::{due_date_then_created, stats};

/// Fixed key holding the todos collection.
pub const TODOS_KEY: &str = "todo:todos";

/// Write-through todo store. Every mutation rewrites the serialized
/// collection before returning; two writers race under last-writer-wins.
///
/// Operations are `async` for interface symmetry with the remote client,
/// though each completes synchronously. The owning session is passed in
/// explicitly — the store keeps no current-user state of its own.
#[derive(Clone)]
pub struct TodoStore {
    kv: Arc<dyn KVStore>,
}

impl TodoStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// The caller's todos: items with a due date first (ascending), then
    /// the rest, newest-created first.
    pub async fn list(&self, user: &LocalUser) -> Result<Vec<Todo>, TodoError> {
        let mut todos: Vec<Todo> = self
            .load_all()?
            .into_iter()
            .filter(|t| t.user_id == user.id)
            .collect();
        todos.sort_by(due_date_then_created);
        Ok(todos)
    }

    /// Create a todo owned by `user`. Title and description are trimmed;
    /// the id is generated locally and the timestamps stamped now.
    pub async fn create(&self, user: &LocalUser, req: TodoRequest) -> Result<Todo, TodoError> {
        let todo = Todo {
            id: new_id(),
            title: req.title.trim().to_string(),
            description: req
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            completed: false,
            created_at: now_rfc3339(),
            due_date: req.due_date,
            user_id: user.id.clone(),
        };

        let mut todos = self.load_all()?;
        todos.push(todo.clone());
        self.save_all(&todos)?;
        debug!("created todo {}", todo.id);
        Ok(todo)
    }

    /// Apply a partial update. NotFound if the id is absent.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, TodoError> {
        let mut todos = self.load_all()?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(format!("todo {id}")))?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }

        let updated = todo.clone();
        self.save_all(&todos)?;
        Ok(updated)
    }

    /// Flip the completion flag.
    pub async fn toggle_completion(&self, id: &str) -> Result<Todo, TodoError> {
        let current = self
            .load_all()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(format!("todo {id}")))?;

        self.update(
            id,
            TodoPatch {
                completed: Some(!current.completed),
                ..TodoPatch::default()
            },
        )
        .await
    }

    /// Delete a todo. NotFound if the id is absent.
    pub async fn delete(&self, id: &str) -> Result<(), TodoError> {
        let todos = self.load_all()?;
        let remaining: Vec<Todo> = todos.iter().filter(|t| t.id != id).cloned().collect();

        if remaining.len() == todos.len() {
            return Err(TodoError::NotFound(format!("todo {id}")));
        }

        self.save_all(&remaining)?;
        debug!("deleted todo {id}");
        Ok(())
    }

    /// Remove every todo owned by `user`, leaving other users' items.
    pub async fn clear_all(&self, user: &LocalUser) -> Result<(), TodoError> {
        let todos = self.load_all()?;
        let remaining: Vec<Todo> = todos
            .into_iter()
            .filter(|t| t.user_id != user.id)
            .collect();
        self.save_all(&remaining)?;
        debug!("cleared todos for {}", user.id);
        Ok(())
    }

    /// Aggregate counts over the caller's todos.
    pub async fn stats_for(&self, user: &LocalUser) -> Result<TodoStats, TodoError> {
        Ok(stats(&self.list(user).await?))
    }

    fn load_all(&self) -> Result<Vec<Todo>, TodoError> {
        let Some(bytes) = self.kv.get(TODOS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(todos) => Ok(todos),
            Err(e) => {
                // A corrupt collection reads as empty rather than wedging
                // every todo operation.
                warn!("todos collection unreadable, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, todos: &[Todo]) -> Result<(), TodoError> {
        let json =
            serde_json::to_vec(todos).map_err(|e| TodoError::Internal(e.to_string()))?;
        self.kv.set(TODOS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_kv::RedbStore;

    fn user(id: &str) -> LocalUser {
        LocalUser {
            id: id.into(),
            full_name: "Test".into(),
            email: format!("{id}@example.com"),
            password: "pw".into(),
            created_at: now_rfc3339(),
        }
    }

    fn store() -> (TodoStore, Arc<RedbStore>, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        (TodoStore::new(kv.clone()), kv, tmp)
    }

    #[tokio::test]
    async fn create_then_list() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");

        let created = store
            .create(
                &alice,
                TodoRequest {
                    title: "X".into(),
                    ..TodoRequest::default()
                },
            )
            .await
            .unwrap();

        let todos = store.list(&alice).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, created.id);
        assert!(!todos[0].completed);
        assert!(!todos[0].id.is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique_and_inputs_trimmed() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");

        let a = store
            .create(
                &alice,
                TodoRequest {
                    title: "  padded  ".into(),
                    description: Some("  desc  ".into()),
                    due_date: None,
                },
            )
            .await
            .unwrap();
        let b = store
            .create(
                &alice,
                TodoRequest {
                    title: "other".into(),
                    ..TodoRequest::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "padded");
        assert_eq!(a.description, "desc");
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_owner() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");
        let bob = user("bob");

        store
            .create(&alice, TodoRequest { title: "mine".into(), ..Default::default() })
            .await
            .unwrap();
        store
            .create(&bob, TodoRequest { title: "theirs".into(), ..Default::default() })
            .await
            .unwrap();

        let todos = store.list(&alice).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "mine");
    }

    #[tokio::test]
    async fn list_orders_due_then_newest() {
        let (store, kv, _tmp) = store();
        let alice = user("alice");

        // Stamp explicit timestamps so the tie-break is deterministic.
        let todos = vec![
            Todo {
                id: "t1".into(),
                title: "old no due".into(),
                description: String::new(),
                completed: false,
                created_at: "2026-08-01T00:00:00+00:00".into(),
                due_date: None,
                user_id: "alice".into(),
            },
            Todo {
                id: "due".into(),
                title: "due".into(),
                description: String::new(),
                completed: false,
                created_at: "2026-07-01T00:00:00+00:00".into(),
                due_date: Some("2024-01-01".into()),
                user_id: "alice".into(),
            },
            Todo {
                id: "t2".into(),
                title: "new no due".into(),
                description: String::new(),
                completed: false,
                created_at: "2026-08-02T00:00:00+00:00".into(),
                due_date: None,
                user_id: "alice".into(),
            },
        ];
        kv.set(TODOS_KEY, &serde_json::to_vec(&todos).unwrap())
            .unwrap();

        let listed = store.list(&alice).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["due", "t2", "t1"]);
    }

    #[tokio::test]
    async fn update_patches_and_rejects_unknown_ids() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");

        let created = store
            .create(&alice, TodoRequest { title: "before".into(), ..Default::default() })
            .await
            .unwrap();

        let updated = store
            .update(
                &created.id,
                TodoPatch {
                    title: Some("after".into()),
                    due_date: Some(Some("2026-09-01".into())),
                    ..TodoPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "after");
        assert_eq!(updated.due_date.as_deref(), Some("2026-09-01"));
        assert!(!updated.completed);

        // Clearing the due date.
        let cleared = store
            .update(
                &created.id,
                TodoPatch {
                    due_date: Some(None),
                    ..TodoPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.due_date.is_none());

        let err = store
            .update("missing", TodoPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
    }

    #[tokio::test]
    async fn toggle_flips_both_ways() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");

        let created = store
            .create(&alice, TodoRequest { title: "t".into(), ..Default::default() })
            .await
            .unwrap();

        let on = store.toggle_completion(&created.id).await.unwrap();
        assert!(on.completed);
        let off = store.toggle_completion(&created.id).await.unwrap();
        assert!(!off.completed);

        let err = store.toggle_completion("missing").await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_and_rejects_unknown_ids() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");

        let created = store
            .create(&alice, TodoRequest { title: "t".into(), ..Default::default() })
            .await
            .unwrap();

        store.delete(&created.id).await.unwrap();
        assert!(store.list(&alice).await.unwrap().is_empty());

        let err = store.delete(&created.id).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
    }

    #[tokio::test]
    async fn clear_all_leaves_other_users_todos() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");
        let bob = user("bob");

        store
            .create(&alice, TodoRequest { title: "a".into(), ..Default::default() })
            .await
            .unwrap();
        store
            .create(&bob, TodoRequest { title: "b".into(), ..Default::default() })
            .await
            .unwrap();

        store.clear_all(&alice).await.unwrap();
        assert!(store.list(&alice).await.unwrap().is_empty());
        assert_eq!(store.list(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stats_for_counts_only_the_owner() {
        let (store, _kv, _tmp) = store();
        let alice = user("alice");
        let bob = user("bob");

        let a = store
            .create(&alice, TodoRequest { title: "a1".into(), ..Default::default() })
            .await
            .unwrap();
        store
            .create(&alice, TodoRequest { title: "a2".into(), ..Default::default() })
            .await
            .unwrap();
        store
            .create(&bob, TodoRequest { title: "b1".into(), ..Default::default() })
            .await
            .unwrap();
        store.toggle_completion(&a.id).await.unwrap();

        let s = store.stats_for(&alice).await.unwrap();
        assert_eq!(s.total, 2);
        assert_eq!(s.completed, 1);
        assert_eq!(s.pending, 1);
    }

    #[tokio::test]
    async fn mutations_are_write_through() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let alice = user("alice");

        {
            let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
            let store = TodoStore::new(kv);
            store
                .create(&alice, TodoRequest { title: "persisted".into(), ..Default::default() })
                .await
                .unwrap();
        }

        // A second store over the same file sees the mutation.
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        let store = TodoStore::new(kv);
        let todos = store.list(&alice).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "persisted");
    }
}
