//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `todos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call draft validation before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - An unknown id is an absence signal, never an error.

use crate::db::DbError;
use crate::model::todo::{Todo, TodoDraft, TodoId, TodoValidationError};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    completed,
    created_date,
    updated_date
FROM todos";

const REQUIRED_COLUMNS: &[&str] = &["id", "title", "completed", "created_date", "updated_date"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for todo persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{column}` is missing from table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    /// Persists a new todo and returns its store-assigned id.
    ///
    /// Both date columns receive the same creation instant.
    fn create(&self, draft: &TodoDraft) -> RepoResult<TodoId>;

    /// Returns the row for `id`, or `None` when the id is unknown.
    fn get(&self, id: TodoId) -> RepoResult<Option<Todo>>;

    /// Returns all rows in insertion (`id`) order.
    fn list(&self) -> RepoResult<Vec<Todo>>;

    /// Overwrites title/completed and refreshes `updated_date`.
    ///
    /// Returns the updated row, or `None` when the id is unknown.
    fn update(&self, id: TodoId, draft: &TodoDraft) -> RepoResult<Option<Todo>>;

    /// Removes the row for `id`. Returns whether a row was removed.
    fn delete(&self, id: TodoId) -> RepoResult<bool>;
}

/// SQLite-backed todo repository over a migrated connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Builds a repository after verifying the connection schema.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when migrations have not
    ///   been applied up to the version this binary expects.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the `todos` shape does not match the registered schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create(&self, draft: &TodoDraft) -> RepoResult<TodoId> {
        draft.validate()?;

        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO todos (title, completed, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?3);",
            params![draft.title.as_str(), bool_to_int(draft.completed), now],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn update(&self, id: TodoId, draft: &TodoDraft) -> RepoResult<Option<Todo>> {
        draft.validate()?;

        // MAX keeps created_date <= updated_date even if the wall clock
        // stepped backwards between create and update.
        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                completed = ?2,
                updated_date = MAX(created_date, ?3)
             WHERE id = ?4;",
            params![
                draft.title.as_str(),
                bool_to_int(draft.completed),
                now_epoch_ms(),
                id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        self.get(id)
    }

    fn delete(&self, id: TodoId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", params![id])?;

        Ok(changed > 0)
    }
}

fn verify_schema(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'todos'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("todos"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(todos);")?;
    let mut rows = stmt.query([])?;
    let mut columns: HashSet<String> = HashSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get("name")?);
    }

    for column in REQUIRED_COLUMNS {
        if !columns.contains(*column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "todos",
                column,
            });
        }
    }

    Ok(())
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    let todo = Todo {
        id: row.get("id")?,
        title: row.get("title")?,
        completed,
        created_date: row.get("created_date")?,
        updated_date: row.get("updated_date")?,
    };
    // Contract violations in stored rows are corruption, not caller input.
    todo.validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(todo)
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
