//! Account API handlers: signup, login, logout.
//!
//! ```text
//! GET  /auth/login   -> blank credential form
//! POST /auth/login   -> establish a session, honour ?next=
//! GET  /auth/signup  -> blank credential form
//! POST /auth/signup  -> create an account and log in
//! GET/POST /auth/logout -> drop the session
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use url::Url;

use crate::domain::{ApiResult, Credentials};
use crate::inbound::http::forms::{CredentialsForm, CredentialsFormPayload, StatusPayload};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Fallback destination after login or signup when no `next` target is set.
pub const DEFAULT_POST_LOGIN_PATH: &str = "/notes";

/// Optional return target carried through the login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// Only site-local paths are honoured, so the login flow cannot be used as
/// an open redirect.
fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && Url::parse(target).is_err()
}

fn post_auth_redirect(next: Option<&str>) -> HttpResponse {
    let target = next
        .filter(|candidate| is_local_path(candidate))
        .unwrap_or(DEFAULT_POST_LOGIN_PATH);
    HttpResponse::Found()
        .insert_header((header::LOCATION, target.to_owned()))
        .finish()
}

fn logged_out() -> web::Json<StatusPayload> {
    web::Json(StatusPayload {
        detail: "logged out".to_owned(),
    })
}

/// Blank login form.
#[utoipa::path(
    get,
    path = "/auth/login",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Blank credential form", body = CredentialsFormPayload)),
    operation_id = "loginForm"
)]
#[get("/login")]
pub async fn login_form() -> web::Json<CredentialsFormPayload> {
    web::Json(CredentialsFormPayload::blank())
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    tags = ["auth"],
    security([]),
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, redirect to `next` or the notes list"),
        (status = 400, description = "Invalid form submission", body = crate::domain::Error),
        (status = 401, description = "Invalid credentials", body = crate::domain::Error)
    ),
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<NextQuery>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(form.into_inner())?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(post_auth_redirect(query.next.as_deref()))
}

/// Blank signup form.
#[utoipa::path(
    get,
    path = "/auth/signup",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Blank credential form", body = CredentialsFormPayload)),
    operation_id = "signupForm"
)]
#[get("/signup")]
pub async fn signup_form() -> web::Json<CredentialsFormPayload> {
    web::Json(CredentialsFormPayload::blank())
}

/// Create an account and log the new user in.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tags = ["auth"],
    security([]),
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created, redirect to `next` or the notes list"),
        (status = 400, description = "Invalid form submission", body = crate::domain::Error),
        (status = 409, description = "Username already taken", body = crate::domain::Error)
    ),
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<NextQuery>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(form.into_inner())?;
    let user = state.accounts.signup(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(post_auth_redirect(query.next.as_deref()))
}

/// Drop the session.
#[utoipa::path(
    get,
    path = "/auth/logout",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Session dropped", body = StatusPayload)),
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> web::Json<StatusPayload> {
    session.purge();
    logged_out()
}

/// Drop the session (form submission variant).
#[utoipa::path(
    post,
    path = "/auth/logout",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Session dropped", body = StatusPayload)),
    operation_id = "logoutSubmit"
)]
#[post("/logout")]
pub async fn logout_submit(session: SessionContext) -> web::Json<StatusPayload> {
    session.purge();
    logged_out()
}
