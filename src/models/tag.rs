use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::post_tag;
use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};

pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TagForm {
    pub name: String,
    pub post_ids: Vec<i64>,
}

impl Tag {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Tag {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    pub fn find_by_id(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let conn = pool.get()?;
        let tag = conn.query_row(
            "SELECT id, name FROM tags WHERE id = ?1",
            params![id],
            Self::from_row,
        )?;
        Ok(tag)
    }

    pub fn list(pool: &DbPool) -> StoreResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY name")?;
        let tags = stmt
            .query_map([], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    pub fn for_post(pool: &DbPool, post_id: i64) -> StoreResult<Vec<Self>> {
        let conn = pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT t.id, t.name FROM tags t
             JOIN posts_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = ?1
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map(params![post_id], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    pub fn create(pool: &DbPool, form: &TagForm) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        tx.execute("INSERT INTO tags (name) VALUES (?1)", params![form.name])?;
        let id = tx.last_insert_rowid();
        post_tag::replace_for_tag(&tx, id, &form.post_ids)?;
        tx.commit()?;
        Ok(Tag {
            id,
            name: form.name.clone(),
        })
    }

    /// Renames the tag and swaps its post set in one transaction.
    pub fn update(pool: &DbPool, id: i64, form: &TagForm) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE tags SET name = ?1 WHERE id = ?2",
            params![form.name, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        post_tag::replace_for_tag(&tx, id, &form.post_ids)?;
        tx.commit()?;
        Ok(Tag {
            id,
            name: form.name.clone(),
        })
    }

    /// Detaches the tag from every post, then removes it.
    pub fn delete(pool: &DbPool, id: i64) -> StoreResult<Self> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        let tag = tx.query_row(
            "SELECT id, name FROM tags WHERE id = ?1",
            params![id],
            Self::from_row,
        )?;
        tx.execute("DELETE FROM posts_tags WHERE tag_id = ?1", params![id])?;
        tx.execute("DELETE FROM tags WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(tag)
    }
}
