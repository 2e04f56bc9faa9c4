//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the HTTP interface: every route from the inbound layer, the payload
//! schemas, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::forms::{
    CredentialsForm, CredentialsFormPayload, NoteFields, NoteForm, NoteFormPayload,
    NoteListPayload, NotePayload, StatusPayload,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login or /auth/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the notes HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes backend API",
        description = "Session-authenticated CRUD over slug-addressed notes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::notes::home,
        crate::inbound::http::notes::success,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::add_note_form,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::note_detail,
        crate::inbound::http::notes::edit_note_form,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note_confirm,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup_form,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::logout_submit,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        NoteForm,
        NoteFields,
        NoteFormPayload,
        NotePayload,
        NoteListPayload,
        CredentialsForm,
        CredentialsFormPayload,
        StatusPayload,
    )),
    tags(
        (name = "notes", description = "Ownership-scoped note CRUD"),
        (name = "auth", description = "Account and session management"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Smoke coverage for document generation.

    use super::*;

    #[test]
    fn document_builds_and_lists_the_note_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/notes"));
        assert!(paths.contains(&"/notes/{slug}"));
        assert!(paths.contains(&"/auth/login"));
    }
}
