//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions plus an extractor that
//! enforces authentication the way a classic web app does: anonymous
//! visitors are redirected to the login form with the originally requested
//! URL preserved in the `next` query parameter.

use std::fmt;
use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Route serving the login form; anonymous visitors are sent here.
pub const LOGIN_PATH: &str = "/auth/login";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match raw.parse::<UserId>() {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!(%error, "invalid user id in session cookie");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Drop the whole session, logging the user out.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req.get_session())))
    }
}

/// Extractor yielding the authenticated user's id.
///
/// Fails with a [`LoginRedirect`] instead of an error payload, so every
/// protected handler gets the redirect-to-login behaviour by declaring this
/// parameter.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        let outcome = match session.get::<String>(USER_ID_KEY) {
            Ok(Some(raw)) => match raw.parse::<UserId>() {
                Ok(id) => Ok(Self(id)),
                Err(error) => {
                    warn!(%error, "invalid user id in session cookie");
                    Err(LoginRedirect::new(requested_target(req)).into())
                }
            },
            Ok(None) => Err(LoginRedirect::new(requested_target(req)).into()),
            Err(error) => {
                Err(Error::internal(format!("failed to read session: {error}")).into())
            }
        };
        ready(outcome)
    }
}

fn requested_target(req: &HttpRequest) -> String {
    req.uri().path_and_query().map_or_else(
        || req.uri().path().to_owned(),
        |target| target.as_str().to_owned(),
    )
}

/// Redirect response sent to anonymous visitors of protected routes.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    /// Redirect to the login form, returning to `next` after login.
    pub fn new(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// Full redirect target including the `next` parameter.
    pub fn location(&self) -> String {
        format!("{LOGIN_PATH}?next={}", self.next)
    }
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required, redirecting to {}", self.location())
    }
}

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Session round-trip and redirect coverage.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::test_session_middleware;

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&UserId::random())?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.0.to_string())
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_redirected_with_next() {
        let app = test::init_service(
            App::new().wrap(test_session_middleware()).route(
                "/private/page",
                web::get()
                    .to(|_user: CurrentUser| async move { HttpResponse::Ok().finish() }),
            ),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/private/page").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some("/auth/login?next=/private/page"));
    }

    #[actix_web::test]
    async fn purge_logs_the_user_out() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&UserId::random())?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/clear",
                    web::get().to(|session: SessionContext| async move {
                        session.purge();
                        HttpResponse::Ok().finish()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.0.to_string())
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let clear_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/clear")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(clear_res.status(), StatusCode::OK);

        // The purged cookie no longer authenticates the user.
        let cleared = clear_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.value().to_owned());
        let get_req = match cleared {
            Some(value) if !value.is_empty() => test::TestRequest::get()
                .uri("/get")
                .cookie(actix_web::cookie::Cookie::new("session", value))
                .to_request(),
            _ => test::TestRequest::get().uri("/get").to_request(),
        };
        let get_res = test::call_service(&app, get_req).await;
        assert_eq!(get_res.status(), StatusCode::FOUND);
    }
}
