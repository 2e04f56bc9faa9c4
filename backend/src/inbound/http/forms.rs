//! Form payloads and JSON bodies exchanged with clients.
//!
//! Submissions arrive as `application/x-www-form-urlencoded` bodies; reads
//! go back out as JSON. Conversion into domain types happens here so
//! handlers surface field-level validation errors without touching raw
//! strings themselves.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Credentials, CredentialsValidationError, Error, Note, NoteBody, NoteDraft, NoteTitle, Slug,
};

/// Note entry form fields, as submitted by clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    /// Left blank to request the title-derived fallback.
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    /// Validate the submission into a draft, reporting the failing field.
    pub(crate) fn try_into_draft(self) -> Result<NoteDraft, Error> {
        let title = NoteTitle::new(&self.title).map_err(|err| field_error("title", &err))?;
        let text = NoteBody::new(&self.text).map_err(|err| field_error("text", &err))?;
        let slug = match self
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        {
            Some(raw) => Some(Slug::new(raw).map_err(|err| field_error("slug", &err))?),
            None => None,
        };
        Ok(NoteDraft { title, text, slug })
    }
}

/// Credential form shared by the login and signup pages.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = Error;

    fn try_from(form: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&form.username, &form.password).map_err(|err| match &err {
            CredentialsValidationError::InvalidUsername(_) => field_error("username", &err),
            CredentialsValidationError::EmptyPassword => field_error("password", &err),
        })
    }
}

fn field_error(field: &str, err: &impl std::fmt::Display) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Note fields rendered back to clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteFields {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl From<&Note> for NoteFields {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title().as_str().to_owned(),
            text: note.text().as_str().to_owned(),
            slug: note.slug().as_str().to_owned(),
        }
    }
}

/// Entry form payload for the add and edit pages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteFormPayload {
    pub form: NoteFields,
}

impl NoteFormPayload {
    /// Blank form for the add page.
    pub(crate) fn blank() -> Self {
        Self {
            form: NoteFields::default(),
        }
    }

    /// Form pre-filled with the note's current values for the edit page.
    pub(crate) fn for_note(note: &Note) -> Self {
        Self {
            form: NoteFields::from(note),
        }
    }
}

/// Credential form payload for the login and signup pages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialsFormPayload {
    pub form: CredentialsForm,
}

impl CredentialsFormPayload {
    /// Blank form for anonymous visitors.
    pub(crate) fn blank() -> Self {
        Self {
            form: CredentialsForm {
                username: String::new(),
                password: String::new(),
            },
        }
    }
}

/// Single-note payload for the detail and delete pages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotePayload {
    pub note: NoteFields,
}

/// List payload for the notes page, scoped to the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteListPayload {
    pub notes: Vec<NoteFields>,
}

/// Minimal status payload for pages without richer content.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusPayload {
    pub detail: String,
}
