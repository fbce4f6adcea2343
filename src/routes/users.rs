use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::json;

use super::{flash_context, non_blank};
use crate::error::StoreResult;
use crate::models::user::UserForm;
use crate::store::Store;

/// How many of the newest posts the user listing shows.
const RECENT_POSTS: i64 = 5;

#[derive(FromForm)]
pub struct UserFormData {
    #[field(validate = non_blank())]
    pub first_name: String,
    #[field(validate = non_blank())]
    pub last_name: String,
    pub image_url: Option<String>,
}

impl From<UserFormData> for UserForm {
    fn from(data: UserFormData) -> Self {
        UserForm {
            first_name: data.first_name,
            last_name: data.last_name,
            image_url: data.image_url,
        }
    }
}

// ── Users ───────────────────────────────────────────────

#[get("/users")]
pub fn users_list(
    store: &State<Arc<dyn Store>>,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let users = store.user_list()?;
    let recent_posts = store.post_recent(RECENT_POSTS)?;

    let context = json!({
        "page_title": "Users",
        "users": users,
        "recent_posts": recent_posts,
        "flash": flash_context(flash),
    });

    Ok(Template::render("users/list", &context))
}

#[get("/users/new")]
pub fn users_new(flash: Option<FlashMessage<'_>>) -> Template {
    let context = json!({
        "page_title": "Create a user",
        "flash": flash_context(flash),
    });

    Template::render("users/new", &context)
}

#[get("/users/<id>")]
pub fn users_detail(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let user = store.user_get(id)?;
    let posts = store.user_posts(id)?;

    let context = json!({
        "page_title": user.full_name(),
        "full_name": user.full_name(),
        "user": user,
        "posts": posts,
        "flash": flash_context(flash),
    });

    Ok(Template::render("users/detail", &context))
}

#[get("/users/<id>/edit")]
pub fn users_edit(
    store: &State<Arc<dyn Store>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> StoreResult<Template> {
    let user = store.user_get(id)?;

    let context = json!({
        "page_title": "Edit a user",
        "user": user,
        "flash": flash_context(flash),
    });

    Ok(Template::render("users/edit", &context))
}

// ── POST: Create/Update/Delete User ────────────────────

#[post("/users/new", data = "<form>")]
pub fn users_create(
    store: &State<Arc<dyn Store>>,
    form: Form<UserFormData>,
) -> StoreResult<Flash<Redirect>> {
    let user = store.user_create(&form.into_inner().into())?;
    log::info!("Created user {} ({})", user.id, user.full_name());
    Ok(Flash::success(
        Redirect::to(format!("/users/{}", user.id)),
        format!("User {} added.", user.full_name()),
    ))
}

#[post("/users/<id>/edit", data = "<form>")]
pub fn users_update(
    store: &State<Arc<dyn Store>>,
    id: i64,
    form: Form<UserFormData>,
) -> StoreResult<Flash<Redirect>> {
    let user = store.user_update(id, &form.into_inner().into())?;
    log::info!("Updated user {}", user.id);
    Ok(Flash::success(
        Redirect::to("/users"),
        format!("User {} edited.", user.full_name()),
    ))
}

#[post("/users/<id>/delete")]
pub fn users_delete(store: &State<Arc<dyn Store>>, id: i64) -> StoreResult<Flash<Redirect>> {
    let user = store.user_delete(id)?;
    log::info!("Deleted user {} and their posts", user.id);
    Ok(Flash::success(
        Redirect::to("/users"),
        format!("User {} deleted.", user.full_name()),
    ))
}
