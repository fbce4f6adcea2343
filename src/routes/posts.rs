use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;

use super::{flash_context, non_blank};
use crate::error::StoreResult;
use crate::models::post::PostForm;
use crate::store::Store;

#[derive(FromForm)]
pub struct PostFormData {
    #[field(validate = non_blank())]
    pub title: String,
    #[field(validate = non_blank())]
    pub content: String,
    #[field(default = Vec::new())]
    pub tags: Vec<i64>,
}

impl From<PostFormData> for PostForm {
    fn from(data: PostFormData) -> Self {
        PostForm {
            title: data.title,
            content: data.content,
            tag_ids: data.tags,
        }
    }
}

// ── Posts ───────────────────────────────────────────────

#[get("/users/<user_id>/posts/new")]
pub fn posts_new(
    store: &State<Arc<dyn Store>>,
    user_id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let user = store.user_get(user_id)?;
    let tags = store.tag_list()?;

    let context = json!({
        "page_title": format!("Add post for {}", user.full_name()),
        "full_name": user.full_name(),
        "user": user,
        "tags": tags,
        "flash": flash_context(flash),
    });

    Ok(Template::render("posts/new", &context))
}

#[get("/posts/<id>")]
pub fn posts_detail(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let post = store.post_get(id)?;
    let user = store.user_get(post.user_id)?;
    let tags = store.post_tags(id)?;

    let context = json!({
        "page_title": post.title,
        "created": post.created_display(),
        "post": post,
        "full_name": user.full_name(),
        "user": user,
        "tags": tags,
        "flash": flash_context(flash),
    });

    Ok(Template::render("posts/detail", &context))
}

#[get("/posts/<id>/edit")]
pub fn posts_edit(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let post = store.post_get(id)?;
    let tags = store.tag_list()?;
    let post_tags = store.post_tags(id)?;

    let context = json!({
        "page_title": "Edit post",
        "post": post,
        "tags": tags,
        "post_tags": post_tags.iter().map(|t| t.id).collect::<Vec<_>>(),
        "flash": flash_context(flash),
    });

    Ok(Template::render("posts/edit", &context))
}

// ── POST: Create/Update/Delete Post ────────────────────

#[post("/users/<user_id>/posts/new", data = "<form>")]
pub fn posts_create(
    store: &State<Arc<dyn Store>>,
    user_id: i64,
    form: Form<PostFormData>,
) -> StoreResult<Flash<Redirect>> {
    let post = store.post_create(user_id, &form.into_inner().into())?;
    log::info!("Created post {} for user {}", post.id, user_id);
    Ok(Flash::success(
        Redirect::to(format!("/users/{}", user_id)),
        format!("Post '{}' added.", post.title),
    ))
}

#[post("/posts/<id>/edit", data = "<form>")]
pub fn posts_update(
    store: &State<Arc<dyn Store>>,
    id: i64,
    form: Form<PostFormData>,
) -> StoreResult<Flash<Redirect>> {
    let post = store.post_update(id, &form.into_inner().into())?;
    log::info!("Updated post {}", post.id);
    Ok(Flash::success(
        Redirect::to(format!("/posts/{}", post.id)),
        format!("Post '{}' edited.", post.title),
    ))
}

#[post("/posts/<id>/delete")]
pub fn posts_delete(store: &State<Arc<dyn Store>>, id: i64) -> StoreResult<Flash<Redirect>> {
    let post = store.post_delete(id)?;
    log::info!("Deleted post {} of user {}", post.id, post.user_id);
    Ok(Flash::success(
        Redirect::to(format!("/users/{}", post.user_id)),
        format!("Post '{}' deleted.", post.title),
    ))
}
