use time::macros::format_description;

use super::{escape, Template, USERS_PATH};
use crate::users::repo_types::User;

pub struct CreateForm {
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

impl CreateForm {
    pub fn blank() -> Self {
        Self {
            error: None,
            name: String::new(),
            email: String::new(),
        }
    }
}

impl Template for CreateForm {
    const NAME: &'static str = "users/create";

    fn title(&self) -> &str {
        "Add new User"
    }

    fn body(&self) -> String {
        let mut html = error_banner(self.error.as_deref());
        html.push_str(&user_form(USERS_PATH, &self.name, &self.email, "Create"));
        html
    }
}

pub struct UserList {
    pub users: Vec<User>,
    pub message: Option<String>,
}

impl Template for UserList {
    const NAME: &'static str = "users/list";

    fn title(&self) -> &str {
        "User List"
    }

    fn body(&self) -> String {
        let mut html = String::new();
        if let Some(message) = &self.message {
            html.push_str(&format!(
                "<p class=\"message\">{}</p>\n",
                escape(message)
            ));
        }
        html.push_str(&format!(
            "<p><a href=\"{USERS_PATH}/new\">Add new User</a></p>\n"
        ));

        if self.users.is_empty() {
            html.push_str("<p>No users found.</p>\n");
            return html;
        }

        html.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Email</th><th>Created</th><th></th></tr></thead>\n<tbody>\n",
        );
        for user in &self.users {
            html.push_str(&format!(
                r#"<tr><td>{name}</td><td>{email}</td><td>{created}</td><td><a href="{USERS_PATH}/edit/{id}">Edit</a> <form method="post" action="{USERS_PATH}/delete/{id}" style="display:inline"><button type="submit">Delete</button></form></td></tr>
"#,
                name = escape(&user.name),
                email = escape(&user.email),
                created = created_date(user),
                id = user.id,
            ));
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

pub struct EditForm {
    pub user: User,
    pub error: Option<String>,
}

impl Template for EditForm {
    const NAME: &'static str = "users/edit";

    fn title(&self) -> &str {
        "Edit User"
    }

    fn body(&self) -> String {
        let mut html = error_banner(self.error.as_deref());
        let action = format!("{USERS_PATH}/edit/{}", self.user.id);
        html.push_str(&user_form(&action, &self.user.name, &self.user.email, "Update"));
        html.push_str(&format!(
            "<p><a href=\"{USERS_PATH}\">Back to the user list</a></p>\n"
        ));
        html
    }
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(e) => format!("<p class=\"error\">{}</p>\n", escape(e)),
        None => String::new(),
    }
}

fn user_form(action: &str, name: &str, email: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label for="name">Name</label>
<input id="name" name="name" type="text" value="{name}" required>
<label for="email">Email</label>
<input id="email" name="email" type="email" value="{email}" required>
<button type="submit">{submit}</button>
</form>
"#,
        action = escape(action),
        name = escape(name),
        email = escape(email),
    )
}

fn created_date(user: &User) -> String {
    user.created_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}
