//! Server-side HTML rendering.
//!
//! Plain string templates, escaped at the substitution points. Presentation
//! only; nothing here inspects outcomes beyond choosing banner text.

use axum::response::Html;

use taskboard_core::{Task, User};

use crate::flash::Flash;

/// Render the login page.
#[must_use]
pub fn login_page(flash: &Flash) -> Html<String> {
    let body = format!(
        r#"<h1>Sign in</h1>
{banners}
<form method="post" action="/login">
  <label>Username <input name="username" required autofocus></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Sign in</button>
</form>
<p><a href="/register">Create an account</a></p>"#,
        banners = banners(flash),
    );
    Html(layout("Sign in", &body))
}

/// Render the registration page.
#[must_use]
pub fn register_page(flash: &Flash) -> Html<String> {
    let body = format!(
        r#"<h1>Register</h1>
{banners}
<form method="post" action="/register">
  <label>Name <input name="name" required autofocus></label>
  <label>Birth date <input name="birth_date" type="date"></label>
  <label>Active <input name="active" type="checkbox" checked></label>
  <button type="submit">Register</button>
</form>
<p><a href="/login">Back to sign in</a></p>"#,
        banners = banners(flash),
    );
    Html(layout("Register", &body))
}

/// Everything the task board page needs.
#[derive(Debug)]
pub struct TasksPage<'a> {
    /// Tasks to list.
    pub tasks: &'a [Task],
    /// Users for the assignee dropdown.
    pub users: &'a [User],
    /// Task pre-filling the form, when editing.
    pub editing: Option<&'a Task>,
    /// Signed-in user's display name.
    pub display_name: &'a str,
    /// Pending banners.
    pub flash: &'a Flash,
}

/// Render the task board page.
#[must_use]
pub fn tasks_page(page: &TasksPage<'_>) -> Html<String> {
    let form = task_form(page.editing, page.users);
    let rows: String = page.tasks.iter().map(task_row).collect();

    let body = format!(
        r#"<header>
  <h1>Tasks</h1>
  <p>Signed in as <strong>{name}</strong> — <a href="/logout">Sign out</a></p>
</header>
{banners}
{form}
<table>
  <thead>
    <tr><th>Title</th><th>Description</th><th>Due</th><th>Done</th><th>Assignee</th><th></th></tr>
  </thead>
  <tbody>
{rows}  </tbody>
</table>"#,
        name = escape(page.display_name),
        banners = banners(page.flash),
    );
    Html(layout("Tasks", &body))
}

fn task_form(editing: Option<&Task>, users: &[User]) -> String {
    let heading = if editing.is_some() { "Edit task" } else { "New task" };
    let id_value = editing
        .and_then(|task| task.id)
        .map(|id| id.to_string())
        .unwrap_or_default();
    let title = editing.map(|task| escape(&task.title)).unwrap_or_default();
    let description = editing
        .map(|task| escape(&task.description))
        .unwrap_or_default();
    let due_date = editing
        .and_then(|task| task.due_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let done_checked = if editing.is_some_and(|task| task.done) {
        " checked"
    } else {
        ""
    };
    let selected = editing.and_then(|task| task.assignee.as_ref()).map(|r| r.id);

    let options: String = users
        .iter()
        .filter_map(|user| {
            let id = user.id?;
            let mark = if selected == Some(id) { " selected" } else { "" };
            Some(format!(
                "    <option value=\"{id}\"{mark}>{}</option>\n",
                escape(&user.name)
            ))
        })
        .collect();

    format!(
        r#"<section>
<h2>{heading}</h2>
<form method="post" action="/tasks">
  <input type="hidden" name="id" value="{id_value}">
  <label>Title <input name="title" value="{title}" required></label>
  <label>Description <textarea name="description">{description}</textarea></label>
  <label>Due <input name="due_date" type="date" value="{due_date}"></label>
  <label>Done <input name="done" type="checkbox"{done_checked}></label>
  <label>Assignee <select name="assignee_id" required>
{options}  </select></label>
  <button type="submit">Save</button>
</form>
</section>"#,
    )
}

fn task_row(task: &Task) -> String {
    let due = task
        .due_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let done = if task.done { "yes" } else { "no" };
    let assignee = task
        .assignee
        .as_ref()
        .and_then(|r| r.name.as_deref())
        .map(escape)
        .unwrap_or_default();
    let actions = task
        .id
        .map(|id| {
            format!(
                r#"<a href="/tasks/edit/{id}">edit</a> <a href="/tasks/delete/{id}">delete</a>"#
            )
        })
        .unwrap_or_default();

    format!(
        "    <tr><td>{}</td><td>{}</td><td>{due}</td><td>{done}</td><td>{assignee}</td><td>{actions}</td></tr>\n",
        escape(&task.title),
        escape(&task.description),
    )
}

fn banners(flash: &Flash) -> String {
    let mut out = String::new();
    if let Some(message) = &flash.message {
        out.push_str(&format!("<p class=\"message\">{}</p>\n", escape(message)));
    }
    if let Some(error) = &flash.error {
        out.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} — Taskboard</title>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

/// Escape text for interpolation into HTML content and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
