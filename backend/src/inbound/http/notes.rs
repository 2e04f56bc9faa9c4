//! Note API handlers.
//!
//! ```text
//! GET  /               -> public landing page
//! GET  /notes          -> notes owned by the current user
//! GET  /notes/done     -> post-mutation landing page
//! GET  /notes/add      -> blank entry form
//! POST /notes/add      -> create a note, redirect to /notes/done
//! GET  /notes/{slug}   -> note detail, owner only
//! GET/POST /notes/{slug}/edit   -> edit form / apply edit, owner only
//! GET/POST /notes/{slug}/delete -> confirmation / removal, owner only
//! ```
//!
//! Every owner-only route reports foreign notes exactly like missing ones.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::notes::note_not_found;
use crate::domain::{ApiResult, Slug};
use crate::inbound::http::forms::{
    NoteFields, NoteForm, NoteFormPayload, NoteListPayload, NotePayload, StatusPayload,
};
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;

/// Landing page shown after a successful create, edit, or delete.
pub const SUCCESS_PATH: &str = "/notes/done";

fn redirect_to_success() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, SUCCESS_PATH))
        .finish()
}

/// A slug that does not even satisfy the shape rules cannot name a stored
/// note, so it gets the same not-found answer as an unknown slug.
fn parse_slug(raw: &str) -> ApiResult<Slug> {
    Slug::new(raw).map_err(|_| note_not_found())
}

/// Public landing page.
#[utoipa::path(
    get,
    path = "/",
    tags = ["notes"],
    security([]),
    responses((status = 200, description = "Service landing page", body = StatusPayload)),
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<StatusPayload> {
    web::Json(StatusPayload {
        detail: "notes".to_owned(),
    })
}

/// Post-mutation landing page.
#[utoipa::path(
    get,
    path = "/notes/done",
    tags = ["notes"],
    responses(
        (status = 200, description = "Operation completed", body = StatusPayload),
        (status = 302, description = "Redirect to login for anonymous visitors")
    ),
    operation_id = "success"
)]
#[get("/done")]
pub async fn success(_user: CurrentUser) -> web::Json<StatusPayload> {
    web::Json(StatusPayload {
        detail: "operation completed".to_owned(),
    })
}

/// Notes owned by the current user, in store order.
#[utoipa::path(
    get,
    path = "/notes",
    tags = ["notes"],
    responses(
        (status = 200, description = "Notes owned by the current user", body = NoteListPayload),
        (status = 302, description = "Redirect to login for anonymous visitors")
    ),
    operation_id = "listNotes"
)]
#[get("")]
pub async fn list_notes(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<NoteListPayload>> {
    let notes = state.notes.list(&user.0).await?;
    Ok(web::Json(NoteListPayload {
        notes: notes.iter().map(NoteFields::from).collect(),
    }))
}

/// Blank entry form for a new note.
#[utoipa::path(
    get,
    path = "/notes/add",
    tags = ["notes"],
    responses(
        (status = 200, description = "Blank entry form", body = NoteFormPayload),
        (status = 302, description = "Redirect to login for anonymous visitors")
    ),
    operation_id = "addNoteForm"
)]
#[get("/add")]
pub async fn add_note_form(_user: CurrentUser) -> web::Json<NoteFormPayload> {
    web::Json(NoteFormPayload::blank())
}

/// Create a note owned by the current user.
#[utoipa::path(
    post,
    path = "/notes/add",
    tags = ["notes"],
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Note created, redirect to the success page"),
        (status = 400, description = "Validation failed, e.g. slug already in use", body = crate::domain::Error)
    ),
    operation_id = "createNote"
)]
#[post("/add")]
pub async fn create_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let draft = form.into_inner().try_into_draft()?;
    state.notes.create(&user.0, draft).await?;
    Ok(redirect_to_success())
}

/// Note detail, owner only.
#[utoipa::path(
    get,
    path = "/notes/{slug}",
    tags = ["notes"],
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "The requested note", body = NotePayload),
        (status = 302, description = "Redirect to login for anonymous visitors"),
        (status = 404, description = "No such note for this user", body = crate::domain::Error)
    ),
    operation_id = "noteDetail"
)]
#[get("/{slug}")]
pub async fn note_detail(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotePayload>> {
    let slug = parse_slug(&path.into_inner())?;
    let note = state.notes.detail(&user.0, &slug).await?;
    Ok(web::Json(NotePayload {
        note: NoteFields::from(&note),
    }))
}

/// Entry form pre-filled with the note's current values, owner only.
#[utoipa::path(
    get,
    path = "/notes/{slug}/edit",
    tags = ["notes"],
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Pre-filled entry form", body = NoteFormPayload),
        (status = 302, description = "Redirect to login for anonymous visitors"),
        (status = 404, description = "No such note for this user", body = crate::domain::Error)
    ),
    operation_id = "editNoteForm"
)]
#[get("/{slug}/edit")]
pub async fn edit_note_form(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteFormPayload>> {
    let slug = parse_slug(&path.into_inner())?;
    let note = state.notes.detail(&user.0, &slug).await?;
    Ok(web::Json(NoteFormPayload::for_note(&note)))
}

/// Apply an edit to an owned note.
#[utoipa::path(
    post,
    path = "/notes/{slug}/edit",
    tags = ["notes"],
    params(("slug" = String, Path, description = "Note slug")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Note updated, redirect to the success page"),
        (status = 400, description = "Validation failed, e.g. slug already in use", body = crate::domain::Error),
        (status = 404, description = "No such note for this user", body = crate::domain::Error)
    ),
    operation_id = "updateNote"
)]
#[post("/{slug}/edit")]
pub async fn update_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path.into_inner())?;
    let draft = form.into_inner().try_into_draft()?;
    state.notes.update(&user.0, &slug, draft).await?;
    Ok(redirect_to_success())
}

/// Deletion confirmation page, owner only.
#[utoipa::path(
    get,
    path = "/notes/{slug}/delete",
    tags = ["notes"],
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "The note about to be removed", body = NotePayload),
        (status = 302, description = "Redirect to login for anonymous visitors"),
        (status = 404, description = "No such note for this user", body = crate::domain::Error)
    ),
    operation_id = "deleteNoteConfirm"
)]
#[get("/{slug}/delete")]
pub async fn delete_note_confirm(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotePayload>> {
    let slug = parse_slug(&path.into_inner())?;
    let note = state.notes.detail(&user.0, &slug).await?;
    Ok(web::Json(NotePayload {
        note: NoteFields::from(&note),
    }))
}

/// Remove an owned note.
#[utoipa::path(
    post,
    path = "/notes/{slug}/delete",
    tags = ["notes"],
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Note removed, redirect to the success page"),
        (status = 404, description = "No such note for this user", body = crate::domain::Error)
    ),
    operation_id = "deleteNote"
)]
#[post("/{slug}/delete")]
pub async fn delete_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path.into_inner())?;
    state.notes.delete(&user.0, &slug).await?;
    Ok(redirect_to_success())
}
