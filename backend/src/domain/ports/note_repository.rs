//! Port abstraction for note persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::note::Note;
use crate::domain::slug::Slug;
use crate::domain::user::UserId;

/// Persistence errors raised by note repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotePersistenceError {
    /// The store's slug uniqueness constraint rejected the write.
    #[error("a note with slug `{slug}` already exists")]
    DuplicateSlug { slug: String },
    /// Query or mutation failed during execution.
    #[error("note repository query failed: {message}")]
    Query { message: String },
}

/// Storage port for notes.
///
/// The store owns the slug uniqueness constraint: `insert` and `replace`
/// reject writes whose slug collides with a different record, mirroring a
/// relational unique index.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a new note.
    async fn insert(&self, note: Note) -> Result<(), NotePersistenceError>;

    /// Replace the note currently stored under `slug` with `note`.
    ///
    /// The stored record keeps its position; a slug change must not collide
    /// with any other record.
    async fn replace(&self, slug: &Slug, note: Note) -> Result<(), NotePersistenceError>;

    /// Fetch a note by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NotePersistenceError>;

    /// Remove a note by slug. Returns whether a record was removed.
    async fn delete(&self, slug: &Slug) -> Result<bool, NotePersistenceError>;

    /// All notes owned by `author`, in insertion order.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError>;
}
