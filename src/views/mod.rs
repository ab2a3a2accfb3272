//! Server-rendered HTML pages.
//!
//! Each page is a typed [`Template`]; [`render`] wraps its body in the shared
//! layout. Every piece of user-supplied text goes through [`escape`].

pub mod users;

use axum::response::Html;
use tracing::debug;

pub const USERS_PATH: &str = "/users";

pub trait Template {
    /// Identifier used in logs, e.g. `users/create`.
    const NAME: &'static str;

    fn title(&self) -> &str;
    fn body(&self) -> String;
}

pub fn render<T: Template>(page: &T) -> Html<String> {
    debug!(template = T::NAME, "render");
    Html(layout(page.title(), &page.body()))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header><nav><a href="{USERS_PATH}">Users</a> | <a href="{USERS_PATH}/new">Add new User</a></nav></header>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shown for any unmatched route.
pub struct NotFoundPage;

impl Template for NotFoundPage {
    const NAME: &'static str = "errors/404";

    fn title(&self) -> &str {
        "Page Not Found"
    }

    fn body(&self) -> String {
        format!(
            r#"<p>The page you requested does not exist.</p>
<p><a href="{USERS_PATH}">Back to the user list</a></p>"#
        )
    }
}
