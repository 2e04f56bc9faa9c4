//! Note lifecycle logic: creation, slug resolution, edit, and delete.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use backend::domain::Slug;
use backend::server::build_app;
use support::TestBackend;

const NOTE_TITLE: &str = "Заголовок";
const NEW_NOTE_TITLE: &str = "Новый заголовок";
const NOTE_TEXT: &str = "Текст";
const NEW_NOTE_TEXT: &str = "Новый текст";
const FORM_SLUG: &str = "form-slug";
const NOTE_SLUG: &str = "note-slug";
const NEW_NOTE_SLUG: &str = "new-note-slug";

#[actix_web::test]
async fn user_can_create_a_note() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;

    let resp =
        support::submit_note_form(&app, &author, "/notes/add", NOTE_TITLE, NOTE_TEXT, Some(FORM_SLUG))
            .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(support::location(&resp), "/notes/done");
    assert_eq!(backend.notes.count(), 1);

    let detail = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/notes/{FORM_SLUG}"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body: Value = test::read_body_json(detail).await;
    assert_eq!(body["note"]["title"], NOTE_TITLE);
    assert_eq!(body["note"]["text"], NOTE_TEXT);
    assert_eq!(body["note"]["slug"], FORM_SLUG);
}

#[actix_web::test]
async fn anonymous_visitors_cannot_create_notes() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/notes/add")
            .set_form([
                ("title", NOTE_TITLE),
                ("text", NOTE_TEXT),
                ("slug", FORM_SLUG),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(support::location(&resp), "/auth/login?next=/notes/add");
    assert_eq!(backend.notes.count(), 0);
}

#[actix_web::test]
async fn slugs_must_be_unique() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;
    support::create_note(&app, &author, NOTE_TITLE, NOTE_TEXT, Some(FORM_SLUG)).await;

    let resp =
        support::submit_note_form(&app, &author, "/notes/add", NOTE_TITLE, NOTE_TEXT, Some(FORM_SLUG))
            .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        format!("{FORM_SLUG} - slug already in use; each note needs a distinct identifier")
    );
    assert_eq!(body["details"]["field"], "slug");
    assert_eq!(backend.notes.count(), 1);
}

#[actix_web::test]
async fn missing_slug_falls_back_to_the_transliterated_title() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;

    let resp =
        support::submit_note_form(&app, &author, "/notes/add", NOTE_TITLE, NOTE_TEXT, None).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(support::location(&resp), "/notes/done");
    assert_eq!(backend.notes.count(), 1);

    let expected_slug = Slug::derive(NOTE_TITLE);
    assert_eq!(expected_slug.as_str(), "zagolovok");

    let detail = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/notes/{expected_slug}"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body: Value = test::read_body_json(detail).await;
    assert_eq!(body["note"]["slug"], expected_slug.as_str());
}

#[actix_web::test]
async fn author_can_edit_a_note() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;
    support::create_note(&app, &author, NOTE_TITLE, NOTE_TEXT, Some(NOTE_SLUG)).await;

    let resp = support::submit_note_form(
        &app,
        &author,
        &format!("/notes/{NOTE_SLUG}/edit"),
        NEW_NOTE_TITLE,
        NEW_NOTE_TEXT,
        Some(NEW_NOTE_SLUG),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(support::location(&resp), "/notes/done");

    let detail = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/notes/{NEW_NOTE_SLUG}"))
            .cookie(author.clone())
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body: Value = test::read_body_json(detail).await;
    assert_eq!(body["note"]["title"], NEW_NOTE_TITLE);
    assert_eq!(body["note"]["text"], NEW_NOTE_TEXT);
    assert_eq!(body["note"]["slug"], NEW_NOTE_SLUG);

    // The old slug no longer resolves.
    let gone = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/notes/{NOTE_SLUG}"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn author_can_delete_a_note() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;
    support::create_note(&app, &author, NOTE_TITLE, NOTE_TEXT, Some(NOTE_SLUG)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/notes/{NOTE_SLUG}/delete"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(support::location(&resp), "/notes/done");
    assert_eq!(backend.notes.count(), 0);
}

#[actix_web::test]
async fn other_users_cannot_edit_a_foreign_note() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;
    let somebody = support::sign_up(&app, "somebody", "pw").await;
    support::create_note(&app, &author, NOTE_TITLE, NOTE_TEXT, Some(NOTE_SLUG)).await;

    let resp = support::submit_note_form(
        &app,
        &somebody,
        &format!("/notes/{NOTE_SLUG}/edit"),
        NEW_NOTE_TITLE,
        NEW_NOTE_TEXT,
        Some(NEW_NOTE_SLUG),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The note is untouched.
    let detail = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/notes/{NOTE_SLUG}"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body: Value = test::read_body_json(detail).await;
    assert_eq!(body["note"]["title"], NOTE_TITLE);
    assert_eq!(body["note"]["text"], NOTE_TEXT);
    assert_eq!(body["note"]["slug"], NOTE_SLUG);
}

#[actix_web::test]
async fn other_users_cannot_delete_a_foreign_note() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    let author = support::sign_up(&app, "author", "pw").await;
    let somebody = support::sign_up(&app, "somebody", "pw").await;
    support::create_note(&app, &author, NOTE_TITLE, NOTE_TEXT, Some(NOTE_SLUG)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/notes/{NOTE_SLUG}/delete"))
            .cookie(somebody)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(backend.notes.count(), 1);
}

#[actix_web::test]
async fn usernames_are_unique_across_signups() {
    let backend = TestBackend::new();
    let app = test::init_service(build_app(backend.app_deps())).await;
    support::sign_up(&app, "author", "pw").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/signup")
            .set_form([("username", "author"), ("password", "other")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
