//! Note use-cases: ownership-filtered CRUD with slug resolution.
//!
//! Every note-scoped operation first resolves the target through the
//! ownership filter: a note that exists but belongs to someone else is
//! reported exactly like a note that does not exist, so non-owners cannot
//! probe for slugs.

use std::sync::Arc;

use serde_json::json;
use tracing::error;

use crate::domain::error::Error;
use crate::domain::note::{Note, NoteDraft};
use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::slug::Slug;
use crate::domain::user::UserId;
use crate::domain::ApiResult;

/// Not-found error shared by missing and foreign notes.
///
/// Both cases must produce an indistinguishable payload.
pub(crate) fn note_not_found() -> Error {
    Error::not_found("note not found")
}

/// Field-level validation error for a slug that is already taken.
pub(crate) fn slug_in_use(slug: &str) -> Error {
    Error::invalid_request(format!(
        "{slug} - slug already in use; each note needs a distinct identifier"
    ))
    .with_details(json!({ "field": "slug", "code": "slug_in_use", "value": slug }))
}

fn storage_error(err: NotePersistenceError) -> Error {
    error!(error = %err, "note repository failure");
    Error::internal("note storage failed")
}

/// Application service implementing the note operations.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    /// Construct the service over a note repository.
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Create a note owned by `author`.
    ///
    /// A proposed slug is checked against all existing notes before the
    /// write. A derived slug is not pre-checked; the store's uniqueness
    /// constraint rejects duplicates at insert time.
    pub async fn create(&self, author: &UserId, draft: NoteDraft) -> ApiResult<Note> {
        let slug = match draft.slug {
            Some(slug) => {
                let taken = self
                    .repo
                    .find_by_slug(&slug)
                    .await
                    .map_err(storage_error)?
                    .is_some();
                if taken {
                    return Err(slug_in_use(slug.as_str()));
                }
                slug
            }
            None => Slug::derive(draft.title.as_str()),
        };

        let note = Note::new(draft.title, draft.text, slug, author.clone());
        match self.repo.insert(note.clone()).await {
            Ok(()) => Ok(note),
            Err(NotePersistenceError::DuplicateSlug { slug }) => Err(slug_in_use(&slug)),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Notes owned by `requester`, in store order.
    pub async fn list(&self, requester: &UserId) -> ApiResult<Vec<Note>> {
        self.repo
            .list_by_author(requester)
            .await
            .map_err(storage_error)
    }

    /// Fetch a single note, owner only.
    pub async fn detail(&self, requester: &UserId, slug: &Slug) -> ApiResult<Note> {
        self.owned(requester, slug).await
    }

    /// Update title, text, and slug of an owned note.
    ///
    /// The author never changes. A new slug must not collide with any other
    /// note; keeping the current slug is always allowed.
    pub async fn update(
        &self,
        requester: &UserId,
        slug: &Slug,
        draft: NoteDraft,
    ) -> ApiResult<Note> {
        let current = self.owned(requester, slug).await?;
        let next_slug = match draft.slug {
            Some(next) => {
                if next != *slug {
                    let taken = self
                        .repo
                        .find_by_slug(&next)
                        .await
                        .map_err(storage_error)?
                        .is_some();
                    if taken {
                        return Err(slug_in_use(next.as_str()));
                    }
                }
                next
            }
            None => Slug::derive(draft.title.as_str()),
        };

        let updated = Note::new(draft.title, draft.text, next_slug, current.author().clone());
        match self.repo.replace(slug, updated.clone()).await {
            Ok(()) => Ok(updated),
            Err(NotePersistenceError::DuplicateSlug { slug }) => Err(slug_in_use(&slug)),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Remove an owned note.
    pub async fn delete(&self, requester: &UserId, slug: &Slug) -> ApiResult<()> {
        self.owned(requester, slug).await?;
        let removed = self.repo.delete(slug).await.map_err(storage_error)?;
        if removed {
            Ok(())
        } else {
            Err(note_not_found())
        }
    }

    async fn owned(&self, requester: &UserId, slug: &Slug) -> ApiResult<Note> {
        let note = self
            .repo
            .find_by_slug(slug)
            .await
            .map_err(storage_error)?
            .ok_or_else(note_not_found)?;
        if note.author() != requester {
            return Err(note_not_found());
        }
        Ok(note)
    }
}
