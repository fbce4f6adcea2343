use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};

/// Stored for users created without a picture.
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default_user_pic.jpg";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

impl UserForm {
    /// Blank or missing urls fall back to the placeholder picture.
    pub fn image_url(&self) -> &str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_IMAGE_URL,
        }
    }
}

impl User {
    const SELECT_COLS: &'static str = "id, first_name, last_name, image_url";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            image_url: row.get("image_url")?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let conn = pool.get()?;
        let user = conn.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )?;
        Ok(user)
    }

    pub fn list(pool: &DbPool) -> StoreResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY last_name, first_name",
            Self::SELECT_COLS
        ))?;
        let users = stmt
            .query_map([], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    pub fn create(pool: &DbPool, form: &UserForm) -> StoreResult<Self> {
        let conn = pool.get()?;
        conn.execute(
            "INSERT INTO users (first_name, last_name, image_url) VALUES (?1, ?2, ?3)",
            params![form.first_name, form.last_name, form.image_url()],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            image_url: form.image_url().to_string(),
        })
    }

    /// Replaces every mutable field.
    pub fn update(pool: &DbPool, id: i64, form: &UserForm) -> StoreResult<Self> {
        let conn = pool.get()?;
        let changed = conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, image_url = ?3 WHERE id = ?4",
            params![form.first_name, form.last_name, form.image_url(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(User {
            id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            image_url: form.image_url().to_string(),
        })
    }

    /// Removes the user together with its posts and their tag links.
    pub fn delete(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        let user = tx.query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )?;
        tx.execute(
            "DELETE FROM posts_tags WHERE post_id IN (SELECT id FROM posts WHERE user_id = ?1)",
            params![id],
        )?;
        tx.execute("DELETE FROM posts WHERE user_id = ?1", params![id])?;
        tx.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(user)
    }
}
