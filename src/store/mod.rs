use crate::error::StoreResult;
use crate::models::post::{Post, PostForm};
use crate::models::tag::{Tag, TagForm};
use crate::models::user::{User, UserForm};

pub mod sqlite;

/// Unified data-access trait. Every route goes through here.
/// Implementation: `SqliteStore` (wraps rusqlite/r2d2).
pub trait Store: Send + Sync {
    // ── Lifecycle ───────────────────────────────────────────────────
    fn run_migrations(&self) -> StoreResult<()>;

    // ── Users ───────────────────────────────────────────────────────
    fn user_list(&self) -> StoreResult<Vec<User>>;
    fn user_get(&self, id: i64) -> StoreResult<User>;
    fn user_create(&self, form: &UserForm) -> StoreResult<User>;
    fn user_update(&self, id: i64, form: &UserForm) -> StoreResult<User>;
    /// Cascades to the user's posts and their tag links.
    fn user_delete(&self, id: i64) -> StoreResult<User>;
    fn user_posts(&self, id: i64) -> StoreResult<Vec<Post>>;

    // ── Posts ────────────────────────────────────────────────────────
    fn post_list(&self) -> StoreResult<Vec<Post>>;
    fn post_recent(&self, limit: i64) -> StoreResult<Vec<Post>>;
    fn post_get(&self, id: i64) -> StoreResult<Post>;
    fn post_create(&self, user_id: i64, form: &PostForm) -> StoreResult<Post>;
    fn post_update(&self, id: i64, form: &PostForm) -> StoreResult<Post>;
    fn post_delete(&self, id: i64) -> StoreResult<Post>;
    fn post_tags(&self, id: i64) -> StoreResult<Vec<Tag>>;

    // ── Tags ─────────────────────────────────────────────────────────
    fn tag_list(&self) -> StoreResult<Vec<Tag>>;
    fn tag_get(&self, id: i64) -> StoreResult<Tag>;
    fn tag_create(&self, form: &TagForm) -> StoreResult<Tag>;
    fn tag_update(&self, id: i64, form: &TagForm) -> StoreResult<Tag>;
    fn tag_delete(&self, id: i64) -> StoreResult<Tag>;
    fn tag_posts(&self, id: i64) -> StoreResult<Vec<Post>>;
}
