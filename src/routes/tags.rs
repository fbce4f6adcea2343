use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;

use super::{flash_context, max_chars};
use crate::error::StoreResult;
use crate::models::tag::{TagForm, MAX_NAME_LEN};
use crate::store::Store;

#[derive(FromForm)]
pub struct TagFormData {
    #[field(validate = max_chars(MAX_NAME_LEN))]
    pub name: String,
    #[field(default = Vec::new())]
    pub posts: Vec<i64>,
}

impl From<TagFormData> for TagForm {
    fn from(data: TagFormData) -> Self {
        TagForm {
            name: data.name,
            post_ids: data.posts,
        }
    }
}

// ── Tags ────────────────────────────────────────────────

#[get("/tags")]
pub fn tags_list(
    store: &State<Arc<dyn Store>>,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let tags = store.tag_list()?;

    let context = json!({
        "page_title": "Tags",
        "tags": tags,
        "flash": flash_context(flash),
    });

    Ok(Template::render("tags/list", &context))
}

#[get("/tags/new")]
pub fn tags_new(
    store: &State<Arc<dyn Store>>,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let posts = store.post_list()?;

    let context = json!({
        "page_title": "Create a tag",
        "posts": posts,
        "flash": flash_context(flash),
    });

    Ok(Template::render("tags/new", &context))
}

#[get("/tags/<id>")]
pub fn tags_detail(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let tag = store.tag_get(id)?;
    let posts = store.tag_posts(id)?;

    let context = json!({
        "page_title": tag.name,
        "tag": tag,
        "posts": posts,
        "flash": flash_context(flash),
    });

    Ok(Template::render("tags/detail", &context))
}

#[get("/tags/<id>/edit")]
pub fn tags_edit(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let tag = store.tag_get(id)?;
    let posts = store.post_list()?;
    let tag_posts = store.tag_posts(id)?;

    let context = json!({
        "page_title": "Edit a tag",
        "tag": tag,
        "posts": posts,
        "tag_posts": tag_posts.iter().map(|p| p.id).collect::<Vec<_>>(),
        "flash": flash_context(flash),
    });

    Ok(Template::render("tags/edit", &context))
}

// ── POST: Create/Update/Delete Tag ─────────────────────

#[post("/tags/new", data = "<form>")]
pub fn tags_create(
    store: &State<Arc<dyn Store>>,
    form: Form<TagFormData>,
) -> StoreResult<Flash<Redirect>> {
    let tag = store.tag_create(&form.into_inner().into())?;
    log::info!("Created tag {} ({})", tag.id, tag.name);
    Ok(Flash::success(
        Redirect::to("/tags"),
        format!("Tag '{}' added.", tag.name),
    ))
}

#[post("/tags/<id>/edit", data = "<form>")]
pub fn tags_update(
    store: &State<Arc<dyn Store>>,
    id: i64,
    form: Form<TagFormData>,
) -> StoreResult<Flash<Redirect>> {
    let tag = store.tag_update(id, &form.into_inner().into())?;
    log::info!("Updated tag {}", tag.id);
    Ok(Flash::success(
        Redirect::to(format!("/tags/{}", tag.id)),
        format!("Tag '{}' edited.", tag.name),
    ))
}

#[post("/tags/<id>/delete")]
pub fn tags_delete(store: &State<Arc<dyn Store>>, id: i64) -> StoreResult<Flash<Redirect>> {
    let tag = store.tag_delete(id)?;
    log::info!("Deleted tag {}", tag.id);
    Ok(Flash::success(
        Redirect::to("/tags"),
        format!("Tag '{}' deleted.", tag.name),
    ))
}
