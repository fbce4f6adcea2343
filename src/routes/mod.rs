use rocket::form;
use rocket::request::FlashMessage;
use rocket::response::Redirect;
use serde_json::{json, Value};

pub mod posts;
pub mod tags;
pub mod users;

/// Template value for the one-shot status message, `null` when absent.
pub(crate) fn flash_context(flash: Option<FlashMessage<'_>>) -> Value {
    flash
        .map(|f| json!({ "kind": f.kind(), "message": f.message() }))
        .unwrap_or(Value::Null)
}

/// Form validator: the field must contain something besides whitespace.
pub(crate) fn non_blank<'v>(value: &str) -> form::Result<'v, ()> {
    if value.trim().is_empty() {
        return Err(form::Error::validation("must not be blank").into());
    }
    Ok(())
}

/// Form validator: non-blank and at most `max` characters (not bytes).
pub(crate) fn max_chars<'v>(value: &str, max: usize) -> form::Result<'v, ()> {
    non_blank(value)?;
    if value.chars().count() > max {
        let msg = format!("must be at most {} characters", max);
        return Err(form::Error::validation(msg).into());
    }
    Ok(())
}

#[get("/")]
pub fn index() -> Redirect {
    Redirect::to("/users")
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        index,
        users::users_list,
        users::users_new,
        users::users_create,
        users::users_detail,
        users::users_edit,
        users::users_update,
        users::users_delete,
        posts::posts_new,
        posts::posts_create,
        posts::posts_detail,
        posts::posts_edit,
        posts::posts_update,
        posts::posts_delete,
        tags::tags_list,
        tags::tags_new,
        tags::tags_create,
        tags::tags_detail,
        tags::tags_edit,
        tags::tags_update,
        tags::tags_delete,
    ]
}
