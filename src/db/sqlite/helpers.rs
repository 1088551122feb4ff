//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::Project;

/// Column list shared by every project query.
pub const PROJECT_COLUMNS: &str = "id, name, description, category, state, year, image, created_at";

/// Map a row selected with [`PROJECT_COLUMNS`] into a [`Project`].
pub fn project_from_row(row: &SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        category: row.get("category"),
        state: row.get("state"),
        year: row.get("year"),
        image: row.get("image"),
        created_at: row.get("created_at"),
    }
}
