//! The task board: list, create/update, edit, delete.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use taskboard_core::{Task, TaskId, User, UserId, UserRef};
use taskboard_session::{guard, state as session_state, AuthCallError};

use crate::error::WebError;
use crate::flash::{self, Flash};
use crate::state::AppState;
use crate::views::{self, TasksPage};

/// Task form fields. Raw strings in, converted by [`TaskForm::into_task`];
/// empty optional fields arrive as empty strings from the browser.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    /// Backend id; empty for a new task.
    #[serde(default)]
    pub id: String,
    /// Task title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Due date, `YYYY-MM-DD` or empty.
    #[serde(default)]
    pub due_date: String,
    /// Checkbox: present when done.
    #[serde(default)]
    pub done: Option<String>,
    /// Selected assignee id.
    #[serde(default)]
    pub assignee_id: String,
}

impl TaskForm {
    /// Convert the form into an outbound task record.
    ///
    /// The assignee travels as an identifier-only reference; whether the
    /// saved task is an insert or a replace is decided later, purely by the
    /// presence of `id`.
    fn into_task(self) -> Result<Task, String> {
        let id = match self.id.trim() {
            "" => None,
            raw => Some(
                raw.parse::<TaskId>()
                    .map_err(|_| "The task id in the form is not valid.".to_string())?,
            ),
        };

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| "The due date must be YYYY-MM-DD.".to_string())?,
            ),
        };

        let assignee_id = match self.assignee_id.trim() {
            "" => return Err("An assignee is required.".to_string()),
            raw => raw
                .parse::<UserId>()
                .map_err(|_| "The selected assignee is not valid.".to_string())?,
        };

        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            due_date,
            done: self.done.is_some(),
            assignee: Some(UserRef::new(assignee_id)),
        })
    }
}

/// Render the task board.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, WebError> {
    let Some(display_name) = display_name(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match load_board(&state, &session).await {
        Ok((tasks, users)) => {
            let flash = flash::take(&session).await?;
            Ok(views::tasks_page(&TasksPage {
                tasks: &tasks,
                users: &users,
                editing: None,
                display_name: &display_name,
                flash: &flash,
            })
            .into_response())
        }
        Err(error) => board_failure(error, &display_name),
    }
}

/// Create or update a task, then return to the board.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<TaskForm>,
) -> Result<Response, WebError> {
    let task = match form.into_task() {
        Ok(task) => task,
        Err(reason) => {
            flash::set(&session, Flash::error(reason)).await?;
            return Ok(Redirect::to("/tasks").into_response());
        }
    };

    let result = guard::with_credential(&session, |credential| {
        let api = state.api.clone();
        let task = task.clone();
        async move { api.save_task(&task, &credential).await }
    })
    .await;

    match result {
        Ok(_saved) => {
            flash::set(&session, Flash::message("Task saved.")).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(error) => write_failure(&session, error, "Could not save the task").await,
    }
}

/// Render the board with the form pre-filled for one task.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn edit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<TaskId>,
) -> Result<Response, WebError> {
    let Some(display_name) = display_name(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match load_board(&state, &session).await {
        Ok((tasks, users)) => {
            let Some(editing) = tasks.iter().find(|task| task.id == Some(id)) else {
                flash::set(&session, Flash::error("Task not found.")).await?;
                return Ok(Redirect::to("/tasks").into_response());
            };
            let flash = flash::take(&session).await?;
            Ok(views::tasks_page(&TasksPage {
                tasks: &tasks,
                users: &users,
                editing: Some(editing),
                display_name: &display_name,
                flash: &flash,
            })
            .into_response())
        }
        Err(error) => board_failure(error, &display_name),
    }
}

/// Delete a task, then return to the board.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<TaskId>,
) -> Result<Response, WebError> {
    let result = guard::with_credential(&session, |credential| {
        let api = state.api.clone();
        async move { api.delete_task(id, &credential).await }
    })
    .await;

    match result {
        Ok(()) => {
            flash::set(&session, Flash::message("Task deleted.")).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(error) => write_failure(&session, error, "Could not delete the task").await,
    }
}

/// The signed-in display name, or `None` for an anonymous session.
async fn display_name(session: &Session) -> Result<Option<String>, WebError> {
    let state = session_state::current(session).await.map_err(WebError::from)?;
    Ok(state.user().map(|user| user.display_name.clone()))
}

/// Fetch tasks and users for the board through the session guard.
async fn load_board(
    state: &AppState,
    session: &Session,
) -> Result<(Vec<Task>, Vec<User>), AuthCallError> {
    let tasks = guard::with_credential(session, |credential| {
        let api = state.api.clone();
        async move { api.list_tasks(&credential).await }
    })
    .await?;

    let users = guard::with_credential(session, |credential| {
        let api = state.api.clone();
        async move { api.list_users(&credential).await }
    })
    .await?;

    Ok((tasks, users))
}

/// Turn a failed board load into a response. Auth failures force re-login;
/// anything else renders an empty board with a banner (redirecting back to
/// `/tasks` here would loop).
fn board_failure(error: AuthCallError, display_name: &str) -> Result<Response, WebError> {
    match error {
        AuthCallError::NotSignedIn => Ok(Redirect::to("/login").into_response()),
        AuthCallError::SessionExpired => Ok(Redirect::to("/login?expired=true").into_response()),
        AuthCallError::Gateway(gateway) => {
            let flash = Flash::error(format!("Could not load the board: {gateway}"));
            Ok(views::tasks_page(&TasksPage {
                tasks: &[],
                users: &[],
                editing: None,
                display_name,
                flash: &flash,
            })
            .into_response())
        }
        AuthCallError::Session(error) => Err(error.into()),
    }
}

/// Turn a failed write into a response: banner on the board, or forced
/// re-login when the session died.
async fn write_failure(
    session: &Session,
    error: AuthCallError,
    what: &str,
) -> Result<Response, WebError> {
    match error {
        AuthCallError::NotSignedIn => Ok(Redirect::to("/login").into_response()),
        AuthCallError::SessionExpired => Ok(Redirect::to("/login?expired=true").into_response()),
        AuthCallError::Gateway(gateway) => {
            flash::set(session, Flash::error(format!("{what}: {gateway}"))).await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        AuthCallError::Session(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> TaskForm {
        TaskForm {
            id: String::new(),
            title: "write report".to_string(),
            description: String::new(),
            due_date: String::new(),
            done: None,
            assignee_id: "7".to_string(),
        }
    }

    #[test]
    fn empty_id_means_create() {
        let task = base_form().into_task().unwrap();
        assert_eq!(task.id, None);
        assert_eq!(task.assignee, Some(UserRef::new(UserId::new(7))));
    }

    #[test]
    fn present_id_means_update() {
        let mut form = base_form();
        form.id = "12".to_string();
        let task = form.into_task().unwrap();
        assert_eq!(task.id, Some(TaskId::new(12)));
    }

    #[test]
    fn checkbox_maps_to_done() {
        let mut form = base_form();
        form.done = Some("on".to_string());
        assert!(form.into_task().unwrap().done);
    }

    #[test]
    fn missing_assignee_is_rejected() {
        let mut form = base_form();
        form.assignee_id = String::new();
        assert!(form.into_task().is_err());
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let mut form = base_form();
        form.due_date = "tomorrow".to_string();
        assert!(form.into_task().is_err());
    }
}
