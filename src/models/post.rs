use chrono::{NaiveDateTime, SubsecRound, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::post_tag;
use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<i64>,
}

impl Post {
    const SELECT_COLS: &'static str = "id, title, content, created_at, user_id";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Post {
            id: row.get("id")?,
            title: row.get("title")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            user_id: row.get("user_id")?,
        })
    }

    /// e.g. "Sat Oct 17 2026, 9:30 AM"
    pub fn created_display(&self) -> String {
        self.created_at.format("%a %b %-d %Y, %-I:%M %p").to_string()
    }

    fn query(pool: &DbPool, tail: &str, args: impl rusqlite::Params) -> StoreResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM posts {}", Self::SELECT_COLS, tail))?;
        let posts = stmt
            .query_map(args, Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let conn = pool.get()?;
        let post = conn.query_row(
            &format!("SELECT {} FROM posts WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )?;
        Ok(post)
    }

    pub fn list(pool: &DbPool) -> StoreResult<Vec<Self>> {
        Self::query(pool, "ORDER BY created_at DESC, id DESC", params![])
    }

    pub fn recent(pool: &DbPool, limit: i64) -> StoreResult<Vec<Self>> {
        Self::query(pool, "ORDER BY created_at DESC, id DESC LIMIT ?1", params![limit])
    }

    pub fn for_user(pool: &DbPool, user_id: i64) -> StoreResult<Vec<Self>> {
        Self::query(
            pool,
            "WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            params![user_id],
        )
    }

    pub fn for_tag(pool: &DbPool, tag_id: i64) -> StoreResult<Vec<Self>> {
        Self::query(
            pool,
            "WHERE id IN (SELECT post_id FROM posts_tags WHERE tag_id = ?1)
             ORDER BY created_at DESC, id DESC",
            params![tag_id],
        )
    }

    /// Inserts the post and links its tags in one transaction.
    pub fn create(pool: &DbPool, user_id: i64, form: &PostForm) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let owner_exists: i64 = tx.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        if owner_exists == 0 {
            return Err(StoreError::NotFound);
        }

        let created_at = Utc::now().naive_utc().trunc_subsecs(0);
        tx.execute(
            "INSERT INTO posts (title, content, created_at, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![form.title, form.content, created_at, user_id],
        )?;
        let id = tx.last_insert_rowid();
        post_tag::replace_for_post(&tx, id, &form.tag_ids)?;
        tx.commit()?;

        Ok(Post {
            id,
            title: form.title.clone(),
            content: form.content.clone(),
            created_at,
            user_id,
        })
    }

    /// Replaces title, content and the whole tag set atomically.
    pub fn update(pool: &DbPool, id: i64, form: &PostForm) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE posts SET title = ?1, content = ?2 WHERE id = ?3",
            params![form.title, form.content, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        post_tag::replace_for_post(&tx, id, &form.tag_ids)?;
        let post = tx.query_row(
            &format!("SELECT {} FROM posts WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )?;
        tx.commit()?;
        Ok(post)
    }

    /// Returns the removed post so callers still know its owner.
    pub fn delete(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        let post = tx.query_row(
            &format!("SELECT {} FROM posts WHERE id = ?1", Self::SELECT_COLS),
            params![id],
            Self::from_row,
        )?;
        tx.execute("DELETE FROM posts_tags WHERE post_id = ?1", params![id])?;
        tx.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(post)
    }
}
