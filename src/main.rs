#[macro_use]
extern crate rocket;

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use rocket::fs::FileServer;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::{Build, Request, Rocket};
use rocket_dyn_templates::Template;

mod boot;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod store;

use config::AppConfig;
use store::sqlite::SqliteStore;
use store::Store;

fn error_page(code: u16, message: &str) -> RawHtml<String> {
    RawHtml(format!(
        "<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>{}</h1><p>{}</p><a href='/users'>← Users</a></body></html>",
        code, message
    ))
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    error_page(404, "Page not found.")
}

#[catch(409)]
fn conflict() -> RawHtml<String> {
    error_page(409, "That would duplicate an existing record.")
}

#[catch(422)]
fn unprocessable() -> RawHtml<String> {
    error_page(422, "Some required fields are missing or invalid.")
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    error_page(500, "Internal server error.")
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> RawHtml<String> {
    error_page(status.code, status.reason().unwrap_or("Error"))
}

/// Assemble the application around an already migrated store.
pub fn build_rocket(config: &AppConfig, store: Arc<dyn Store>) -> Rocket<Build> {
    let figment =
        rocket::Config::figment().merge(("template_dir", config.template_dir.clone()));

    let mut app = rocket::custom(figment)
        .manage(store)
        .attach(Template::fairing())
        .mount("/", routes::routes())
        .register(
            "/",
            catchers![not_found, conflict, unprocessable, server_error, default_catcher],
        );

    if Path::new(&config.static_dir).is_dir() {
        app = app.mount("/static", FileServer::from(&config.static_dir));
    }

    app
}

fn or_exit<T, E: Display>(result: Result<T, E>, what: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            log::error!("{}: {}", what, e);
            std::process::exit(1);
        }
    }
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = or_exit(AppConfig::load(), "Failed to load configuration");

    // Boot check — create directories, validate templates
    boot::run(&config);

    let pool = or_exit(
        db::init_pool(&config.database.path, config.database.pool_size),
        "Failed to initialize database pool",
    );
    let store = SqliteStore::new(pool);
    or_exit(store.run_migrations(), "Failed to run database migrations");

    log::info!("Serving {}", config.database.path);

    build_rocket(&config, Arc::new(store))
}
