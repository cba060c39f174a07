use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form,
};
use log::{info, warn};
use serde::Deserialize;

use crate::components::View;
use crate::errors::WikiError;
use crate::route::{self, Operation};
use crate::types::{AppState, Page, FRONT_PAGE};
use crate::utils::page_url;

/// Submitted edit form. `body` is `None` when the field was not sent at all.
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    pub body: Option<String>,
}

const BODY_FIELD: &str = "body";

/// 302 Found, which `axum::response::Redirect` has no constructor for
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn render(state: &AppState, view: View, page: &Page) -> Result<Response, WikiError> {
    let html = state.templates.render(view, page)?;
    Ok(Html(html).into_response())
}

/// Handle root path requests
pub async fn handle_front_page(State(state): State<AppState>) -> Result<Response, WikiError> {
    info!("Front page request");
    match state.store.load(FRONT_PAGE).await {
        Ok(body) => render(&state, View::View, &Page::with_body(FRONT_PAGE, body)),
        Err(_) => render(&state, View::Edit, &Page::new(FRONT_PAGE)),
    }
}

/// `/view/{title}`: show the page, or send the user to its edit form
pub async fn handle_view(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    let title = route::title_for(Operation::View, uri.path())?;
    info!("View request for '{}'", title);

    match state.store.load(&title).await {
        Ok(body) => render(&state, View::View, &Page::with_body(title, body)),
        Err(_) => Ok(found(page_url(Operation::Edit.as_str(), &title))),
    }
}

/// `/edit/{title}`: editing a missing page is the same as creating it
pub async fn handle_edit(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    let title = route::title_for(Operation::Edit, uri.path())?;
    info!("Edit request for '{}'", title);

    let page = match state.store.load(&title).await {
        Ok(body) => Page::with_body(title, body),
        Err(_) => Page::new(title),
    };
    render(&state, View::Edit, &page)
}

/// `/save/{title}`: overwrite the page with the submitted `body`
pub async fn handle_save(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, WikiError> {
    let uri = request.uri().clone();
    let title = route::title_for(Operation::Save, uri.path())?;

    let body = match submitted_body(request, &state).await? {
        Some(body) => body,
        None => query_body(&uri).unwrap_or_default(),
    };
    info!("Save request for '{}', {} bytes", title, body.len());

    let page = Page::with_body(title, body.into_bytes());
    if let Err(e) = state.store.save(&page.title, page.body_bytes()).await {
        warn!("Could not save '{}': {}", page.title, e);
        return Err(e);
    }
    Ok(found(page_url(Operation::View.as_str(), &page.title)))
}

/// The `body` field of a urlencoded or multipart request body.
///
/// `Ok(None)` means no such field was sent; a body that cannot be parsed is a 400.
async fn submitted_body(request: Request, state: &AppState) -> Result<Option<String>, WikiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?
        {
            if field.name() == Some(BODY_FIELD) {
                let text = field.text().await.map_err(|e| WikiError::BadRequest(e.body_text()))?;
                return Ok(Some(text));
            }
        }
        return Ok(None);
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<SaveForm>::from_request(request, state)
            .await
            .map_err(|e| WikiError::BadRequest(e.body_text()))?;
        return Ok(form.body);
    }

    Ok(None)
}

/// `?body=` on the save URL, used when the request body carries no field
fn query_body(uri: &Uri) -> Option<String> {
    Query::<SaveForm>::try_from_uri(uri).ok().and_then(|Query(form)| form.body)
}

/// Anything the router does not recognise
pub async fn handle_not_found(uri: Uri) -> WikiError {
    info!("No route for '{}'", uri.path());
    WikiError::NotFound
}
