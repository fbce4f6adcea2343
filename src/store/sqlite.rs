use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};
use crate::models::post::{Post, PostForm};
use crate::models::tag::{Tag, TagForm};
use crate::models::user::{User, UserForm};

use super::Store;

/// SQLite-backed implementation of the Store trait.
/// Wraps the r2d2 connection pool and delegates to model methods.
pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Store for SqliteStore {
    // ── Lifecycle ───────────────────────────────────────────────────

    fn run_migrations(&self) -> StoreResult<()> {
        crate::db::run_migrations(&self.pool).map_err(|e| StoreError::Database(e.to_string()))
    }

    // ── Users ───────────────────────────────────────────────────────

    fn user_list(&self) -> StoreResult<Vec<User>> {
        User::list(&self.pool)
    }

    fn user_get(&self, id: i64) -> StoreResult<User> {
        User::find_by_id(&self.pool, id)
    }

    fn user_create(&self, form: &UserForm) -> StoreResult<User> {
        User::create(&self.pool, form)
    }

    fn user_update(&self, id: i64, form: &UserForm) -> StoreResult<User> {
        User::update(&self.pool, id, form)
    }

    fn user_delete(&self, id: i64) -> StoreResult<User> {
        User::delete(&self.pool, id)
    }

    fn user_posts(&self, id: i64) -> StoreResult<Vec<Post>> {
        Post::for_user(&self.pool, id)
    }

    // ── Posts ────────────────────────────────────────────────────────

    fn post_list(&self) -> StoreResult<Vec<Post>> {
        Post::list(&self.pool)
    }

    fn post_recent(&self, limit: i64) -> StoreResult<Vec<Post>> {
        Post::recent(&self.pool, limit)
    }

    fn post_get(&self, id: i64) -> StoreResult<Post> {
        Post::find_by_id(&self.pool, id)
    }

    fn post_create(&self, user_id: i64, form: &PostForm) -> StoreResult<Post> {
        Post::create(&self.pool, user_id, form)
    }

    fn post_update(&self, id: i64, form: &PostForm) -> StoreResult<Post> {
        Post::update(&self.pool, id, form)
    }

    fn post_delete(&self, id: i64) -> StoreResult<Post> {
        Post::delete(&self.pool, id)
    }

    fn post_tags(&self, id: i64) -> StoreResult<Vec<Tag>> {
        Tag::for_post(&self.pool, id)
    }

    // ── Tags ─────────────────────────────────────────────────────────

    fn tag_list(&self) -> StoreResult<Vec<Tag>> {
        Tag::list(&self.pool)
    }

    fn tag_get(&self, id: i64) -> StoreResult<Tag> {
        Tag::find_by_id(&self.pool, id)
    }

    fn tag_create(&self, form: &TagForm) -> StoreResult<Tag> {
        Tag::create(&self.pool, form)
    }

    fn tag_update(&self, id: i64, form: &TagForm) -> StoreResult<Tag> {
        Tag::update(&self.pool, id, form)
    }

    fn tag_delete(&self, id: i64) -> StoreResult<Tag> {
        Tag::delete(&self.pool, id)
    }

    fn tag_posts(&self, id: i64) -> StoreResult<Vec<Post>> {
        Post::for_tag(&self.pool, id)
    }
}
