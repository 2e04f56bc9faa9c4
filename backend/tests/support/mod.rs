//! Shared helpers for integration tests.
// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{InMemoryNoteRepository, InMemoryUserRepository};
use backend::server::AppDependencies;

/// In-memory stores plus everything needed to build the app under test.
///
/// The repositories are kept as concrete handles so tests can assert on
/// store contents (e.g. the total note count) without extra routes.
pub struct TestBackend {
    pub notes: Arc<InMemoryNoteRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(InMemoryNoteRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    /// App dependencies over the backend's stores, with a fresh session key
    /// and the `Secure` cookie flag disabled for plain-HTTP test requests.
    pub fn app_deps(&self) -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(self.notes.clone(), self.users.clone())),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Extract the session cookie set on a response.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie present")
        .into_owned()
}

/// Read the `Location` header of a redirect response.
pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header present")
        .to_owned()
}

/// Create an account and return the session cookie establishing its login.
pub async fn sign_up<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/signup")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND, "signup should redirect");
    session_cookie(&resp)
}

/// Submit the note entry form as the given session's user.
pub async fn create_note<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    title: &str,
    text: &str,
    slug: Option<&str>,
) where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = submit_note_form(app, cookie, "/notes/add", title, text, slug).await;
    assert_eq!(resp.status(), StatusCode::FOUND, "create should redirect");
}

/// Post the note entry form to an arbitrary target without asserting on the
/// outcome, for tests that expect failures.
pub async fn submit_note_form<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    title: &str,
    text: &str,
    slug: Option<&str>,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut form: Vec<(&str, &str)> = vec![("title", title), ("text", text)];
    if let Some(slug) = slug {
        form.push(("slug", slug));
    }
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_form(&form)
            .to_request(),
    )
    .await
}
