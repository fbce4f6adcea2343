use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::AppConfig;

/// Templates every route renders through, relative to the template dir
const CRITICAL_TEMPLATES: &[&str] = &[
    "base.html.tera",
    "users/list.html.tera",
    "users/new.html.tera",
    "users/detail.html.tera",
    "users/edit.html.tera",
    "posts/new.html.tera",
    "posts/detail.html.tera",
    "posts/edit.html.tera",
    "tags/list.html.tera",
    "tags/new.html.tera",
    "tags/detail.html.tera",
    "tags/edit.html.tera",
];

/// Static assets, relative to the static dir
const STATIC_ASSETS: &[&str] = &["css/blogly.css"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing assets, and
/// aborts if a template is absent or the database directory is unusable.
pub fn run(config: &AppConfig) {
    info!("Blogly boot check starting...");

    let (warnings, errors) = check(config);

    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!("Boot check passed with {} warning(s).", warnings);
    } else {
        info!("Boot check passed.");
    }
}

/// Returns `(warnings, errors)`.
pub fn check(config: &AppConfig) -> (u32, u32) {
    let mut warnings = 0u32;
    let mut errors = 0u32;

    let db_dir = Path::new(&config.database.path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty());

    // ── 1. Directories ─────────────────────────────────
    let mut dirs = vec![Path::new(&config.static_dir)];
    dirs.extend(db_dir);
    for path in dirs {
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", path.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", path.display(), e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Templates ───────────────────────────────────
    let template_dir = Path::new(&config.template_dir);
    for file in CRITICAL_TEMPLATES {
        if !template_dir.join(file).exists() {
            error!("  MISSING template: {}/{}", config.template_dir, file);
            errors += 1;
        }
    }

    // ── 3. Static assets ───────────────────────────────
    for file in STATIC_ASSETS {
        if !Path::new(&config.static_dir).join(file).exists() {
            warn!(
                "  Missing static asset: {}/{} (pages will be unstyled)",
                config.static_dir, file
            );
            warnings += 1;
        }
    }

    // ── 4. Database directory writable ─────────────────
    if let Some(dir) = db_dir.filter(|d| d.exists()) {
        let test_file = dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Database directory not writable: {}", e);
                errors += 1;
            }
        }
    }

    (warnings, errors)
}
