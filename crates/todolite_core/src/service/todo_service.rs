//! Todo use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Diagnostic events carry metadata only (ids and outcomes, no titles).

use crate::model::todo::{Todo, TodoDraft, TodoId};
use crate::repo::todo_repo::{RepoResult, TodoRepository};
use log::info;

/// Use-case service wrapper for todo CRUD operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new todo and returns its store-assigned id.
    ///
    /// # Contract
    /// - Both date fields are set to the same creation instant.
    /// - Validation errors from the repository pass through unchanged.
    pub fn create_todo(&self, draft: &TodoDraft) -> RepoResult<TodoId> {
        let id = self.repo.create(draft)?;
        info!("event=todo_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Gets one todo by id. `None` means the id is unknown.
    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get(id)
    }

    /// Lists all todos in insertion order.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list()
    }

    /// Full-replaces the mutable fields of an existing todo.
    ///
    /// Returns the updated row, or `None` when the id is unknown.
    pub fn update_todo(&self, id: TodoId, draft: &TodoDraft) -> RepoResult<Option<Todo>> {
        let updated = self.repo.update(id, draft)?;
        match &updated {
            Some(_) => info!("event=todo_update module=service status=ok id={id}"),
            None => info!("event=todo_update module=service status=miss id={id}"),
        }
        Ok(updated)
    }

    /// Deletes a todo by id. Returns whether a row was removed.
    pub fn delete_todo(&self, id: TodoId) -> RepoResult<bool> {
        let removed = self.repo.delete(id)?;
        let status = if removed { "ok" } else { "miss" };
        info!("event=todo_delete module=service status={status} id={id}");
        Ok(removed)
    }
}
