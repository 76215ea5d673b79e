//! List handlers (overview, create, show, rename, delete, complete all).

use axum::extract::Path;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;

use super::{is_xhr, not_found, not_found_async, parse_id, redirect_to_list, rerender};
use crate::list_manager::{find_list, ListManager};
use crate::models::ListError;
use crate::session::ActiveSession;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

/// `GET /lists`
pub async fn index(Extension(session): Extension<ActiveSession>) -> Html<String> {
    let mut session = session.lock().await;
    let flash = session.take_flash();
    Html(views::lists_page(&flash, &session.lists))
}

/// `GET /lists/new`
pub async fn new(Extension(session): Extension<ActiveSession>) -> Html<String> {
    let flash = session.lock().await.take_flash();
    Html(views::new_list_page(&flash, ""))
}

/// `POST /lists`
pub async fn create(
    Extension(session): Extension<ActiveSession>,
    Form(form): Form<ListNameForm>,
) -> Response {
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).create_list(&form.list_name);
    match result {
        Ok(_) => {
            session.flash_success("The list has been created.");
            Redirect::to("/lists").into_response()
        }
        Err(err) => {
            session.flash_error(err.to_string());
            let flash = session.take_flash();
            rerender(views::new_list_page(&flash, &form.list_name))
        }
    }
}

/// `GET /lists/{id}`
pub async fn show(
    Extension(session): Extension<ActiveSession>,
    Path(id): Path<String>,
) -> Response {
    let id = parse_id(&id);
    let mut session = session.lock().await;
    let list = match find_list(&session.lists, id) {
        Ok(list) => list.clone(),
        Err(err) => return not_found(&mut session, err),
    };
    let flash = session.take_flash();
    Html(views::list_page(&flash, &list, "")).into_response()
}

/// `GET /lists/{id}/edit`
pub async fn edit(
    Extension(session): Extension<ActiveSession>,
    Path(id): Path<String>,
) -> Response {
    let id = parse_id(&id);
    let mut session = session.lock().await;
    let list = match find_list(&session.lists, id) {
        Ok(list) => list.clone(),
        Err(err) => return not_found(&mut session, err),
    };
    let flash = session.take_flash();
    Html(views::edit_list_page(&flash, &list, &list.name)).into_response()
}

/// `POST /lists/{id}`
pub async fn update(
    Extension(session): Extension<ActiveSession>,
    Path(id): Path<String>,
    Form(form): Form<ListNameForm>,
) -> Response {
    let id = parse_id(&id);
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).rename_list(id, &form.list_name);
    match result {
        Ok(()) => {
            session.flash_success("The list has been updated.");
            redirect_to_list(id)
        }
        Err(err @ ListError::Validation(_)) => {
            session.flash_error(err.to_string());
            let flash = session.take_flash();
            match find_list(&session.lists, id) {
                Ok(list) => rerender(views::edit_list_page(&flash, list, &form.list_name)),
                Err(err) => not_found(&mut session, err),
            }
        }
        Err(err) => not_found(&mut session, err),
    }
}

/// `POST /lists/{id}/destroy`
///
/// Asynchronous callers get the path to go to as the body instead of a
/// redirect, with `404` when the list is already gone.
pub async fn destroy(
    Extension(session): Extension<ActiveSession>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let id = parse_id(&id);
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).delete_list(id);
    match result {
        Ok(_) if is_xhr(&headers) => "/lists".into_response(),
        Ok(_) => {
            session.flash_success("The list has been deleted.");
            Redirect::to("/lists").into_response()
        }
        Err(err) if is_xhr(&headers) => not_found_async(&mut session, err),
        Err(err) => not_found(&mut session, err),
    }
}

/// `POST /lists/{id}/complete_all`
pub async fn complete_all(
    Extension(session): Extension<ActiveSession>,
    Path(id): Path<String>,
) -> Response {
    let id = parse_id(&id);
    let mut session = session.lock().await;
    let result = ListManager::new(&mut session.lists).complete_all(id);
    match result {
        Ok(()) => {
            session.flash_success("All todos have been completed.");
            redirect_to_list(id)
        }
        Err(err) => not_found(&mut session, err),
    }
}
