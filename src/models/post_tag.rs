//! Rows of the `posts_tags` join table.
//!
//! Both replace functions swap the whole association set of one side: every
//! existing link of the owner is dropped, then one link per distinct id is
//! inserted. They take the caller's transaction so the swap commits (or rolls
//! back) together with the owner's own row.

use rusqlite::{params, Connection};

use crate::error::StoreResult;

pub fn replace_for_post(conn: &Connection, post_id: i64, tag_ids: &[i64]) -> StoreResult<()> {
    conn.execute("DELETE FROM posts_tags WHERE post_id = ?1", params![post_id])?;
    for tag_id in tag_ids {
        conn.execute(
            "INSERT OR IGNORE INTO posts_tags (post_id, tag_id) VALUES (?1, ?2)",
            params![post_id, tag_id],
        )?;
    }
    Ok(())
}

pub fn replace_for_tag(conn: &Connection, tag_id: i64, post_ids: &[i64]) -> StoreResult<()> {
    conn.execute("DELETE FROM posts_tags WHERE tag_id = ?1", params![tag_id])?;
    for post_id in post_ids {
        conn.execute(
            "INSERT OR IGNORE INTO posts_tags (post_id, tag_id) VALUES (?1, ?2)",
            params![post_id, tag_id],
        )?;
    }
    Ok(())
}
