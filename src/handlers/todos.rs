//! Todo handlers (add, delete, toggle).

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Form};
use serde::Deserialize;

use super::{is_xhr, not_found, not_found_async, parse_id, redirect_to_list, rerender};
use crate::list_manager::{find_list, ListManager};
use crate::models::ListError;
use crate::session::ActiveSession;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: String,
}

/// `POST /lists/{id}/todos`
pub async fn create(
    Extension(session): Extension<ActiveSession>,
    Path(list_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Response {
    let list_id = parse_id(&list_id);
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).add_todo(list_id, &form.todo);
    match result {
        Ok(_) => {
            session.flash_success("The todo was added.");
            redirect_to_list(list_id)
        }
        Err(err @ ListError::Validation(_)) => {
            session.flash_error(err.to_string());
            let flash = session.take_flash();
            match find_list(&session.lists, list_id) {
                Ok(list) => rerender(views::list_page(&flash, list, &form.todo)),
                Err(err) => not_found(&mut session, err),
            }
        }
        Err(err) => not_found(&mut session, err),
    }
}

/// `POST /lists/{id}/todos/{todo_id}/destroy`
///
/// Asynchronous callers get `204 No Content` instead of a redirect, or `404`
/// when the list is gone.
pub async fn destroy(
    Extension(session): Extension<ActiveSession>,
    Path((list_id, todo_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let (list_id, todo_id) = (parse_id(&list_id), parse_id(&todo_id));
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).delete_todo(list_id, todo_id);
    match result {
        Ok(()) if is_xhr(&headers) => StatusCode::NO_CONTENT.into_response(),
        Ok(()) => {
            session.flash_success("The todo has been deleted.");
            redirect_to_list(list_id)
        }
        Err(err) if is_xhr(&headers) => not_found_async(&mut session, err),
        Err(err) => not_found(&mut session, err),
    }
}

/// `POST /lists/{id}/todos/{todo_id}`
pub async fn update(
    Extension(session): Extension<ActiveSession>,
    Path((list_id, todo_id)): Path<(String, String)>,
    Form(form): Form<CompletedForm>,
) -> Response {
    let (list_id, todo_id) = (parse_id(&list_id), parse_id(&todo_id));
    let completed = form.completed == "true";
    let mut session = session.lock().await;
    let result =
        ListManager::new(&mut session.lists).set_todo_completed(list_id, todo_id, completed);
    match result {
        Ok(()) => {
            session.flash_success("The todo has been updated.");
            redirect_to_list(list_id)
        }
        Err(err) => not_found(&mut session, err),
    }
}
