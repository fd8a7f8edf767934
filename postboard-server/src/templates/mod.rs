//! HTML templates for the browser-facing pages
//!
//! Templates are minijinja (Jinja2 syntax) kept as standalone `.html` files
//! and embedded at compile time, so the binary carries its own views.
//! Auto-escaping is on for every `.html` template.

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("layout.html")),
    ("_post_card.html", include_str!("_post_card.html")),
    ("home.html", include_str!("home.html")),
    ("post.html", include_str!("post.html")),
    ("user_posts.html", include_str!("user_posts.html")),
    ("error.html", include_str!("error.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        // a template that fails to parse is absent; render reports it as not found
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, "Embedded template failed to parse: {:#}", e);
        }
    }
    env
});

/// Render a named template with a serializable context.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    ENV.get_template(name)?.render(ctx)
}
