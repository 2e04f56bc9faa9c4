//! Note aggregate and its field types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::slug::Slug;
use crate::domain::user::UserId;

/// Maximum allowed length for a note title, in characters.
pub const TITLE_MAX: usize = 128;

/// Validation errors returned by the note field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyBody,
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyBody => write!(f, "text must not be empty"),
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// Short note title shown in listings.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty after trimming.
/// - At most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteTitle(String);

impl NoteTitle {
    /// Validate and construct a [`NoteTitle`] from borrowed input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, NoteValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(NoteValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the title string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NoteTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NoteTitle {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoteTitle> for String {
    fn from(value: NoteTitle) -> Self {
        value.0
    }
}

/// Free-form note body.
///
/// ## Invariants
/// - Non-empty after trimming; interior whitespace is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteBody(String);

impl NoteBody {
    /// Validate and construct a [`NoteBody`] from borrowed input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, NoteValidationError> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(NoteValidationError::EmptyBody);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the body string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NoteBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for NoteBody {
    type Error = NoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NoteBody> for String {
    fn from(value: NoteBody) -> Self {
        value.0
    }
}

/// A note owned by exactly one user and addressed by its slug.
///
/// ## Invariants
/// - `slug` is unique across all notes (enforced by the backing store).
/// - `author` is set at creation and never reassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    title: NoteTitle,
    text: NoteBody,
    slug: Slug,
    author: UserId,
}

impl Note {
    /// Assemble a note from validated parts.
    pub fn new(title: NoteTitle, text: NoteBody, slug: Slug, author: UserId) -> Self {
        Self {
            title,
            text,
            slug,
            author,
        }
    }

    /// Note title.
    pub fn title(&self) -> &NoteTitle {
        &self.title
    }

    /// Note body.
    pub fn text(&self) -> &NoteBody {
        &self.text
    }

    /// URL-safe unique identifier.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Owning user.
    pub fn author(&self) -> &UserId {
        &self.author
    }
}

/// Submitted note content before slug resolution.
///
/// `slug` is `None` when the author left the field blank and expects the
/// title-derived fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: NoteTitle,
    pub text: NoteBody,
    pub slug: Option<Slug>,
}
