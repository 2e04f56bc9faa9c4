//! In-memory repository adapters.
//!
//! Backing store for tests and single-process deployments. Uniqueness
//! constraints are enforced at write time, the same way a relational unique
//! index rejects a violating row at commit.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::note::Note;
use crate::domain::ports::{
    NotePersistenceError, NoteRepository, UserPersistenceError, UserRepository,
};
use crate::domain::slug::Slug;
use crate::domain::user::{User, UserId, Username};

/// Note store over a locked vector, preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored notes, across all authors.
    pub fn count(&self) -> usize {
        self.notes.read().map(|notes| notes.len()).unwrap_or(0)
    }
}

fn note_lock_poisoned() -> NotePersistenceError {
    NotePersistenceError::Query {
        message: "note store lock poisoned".to_owned(),
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: Note) -> Result<(), NotePersistenceError> {
        let mut notes = self.notes.write().map_err(|_| note_lock_poisoned())?;
        if notes.iter().any(|stored| stored.slug() == note.slug()) {
            return Err(NotePersistenceError::DuplicateSlug {
                slug: note.slug().to_string(),
            });
        }
        notes.push(note);
        Ok(())
    }

    async fn replace(&self, slug: &Slug, note: Note) -> Result<(), NotePersistenceError> {
        let mut notes = self.notes.write().map_err(|_| note_lock_poisoned())?;
        if notes
            .iter()
            .any(|stored| stored.slug() != slug && stored.slug() == note.slug())
        {
            return Err(NotePersistenceError::DuplicateSlug {
                slug: note.slug().to_string(),
            });
        }
        let Some(stored) = notes.iter_mut().find(|stored| stored.slug() == slug) else {
            return Err(NotePersistenceError::Query {
                message: format!("no note stored under slug `{slug}`"),
            });
        };
        *stored = note;
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NotePersistenceError> {
        let notes = self.notes.read().map_err(|_| note_lock_poisoned())?;
        Ok(notes.iter().find(|stored| stored.slug() == slug).cloned())
    }

    async fn delete(&self, slug: &Slug) -> Result<bool, NotePersistenceError> {
        let mut notes = self.notes.write().map_err(|_| note_lock_poisoned())?;
        let before = notes.len();
        notes.retain(|stored| stored.slug() != slug);
        Ok(notes.len() < before)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let notes = self.notes.read().map_err(|_| note_lock_poisoned())?;
        Ok(notes
            .iter()
            .filter(|stored| stored.author() == author)
            .cloned()
            .collect())
    }
}

/// User store over a locked vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_lock_poisoned() -> UserPersistenceError {
    UserPersistenceError::Query {
        message: "user store lock poisoned".to_owned(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(|_| user_lock_poisoned())?;
        if users
            .iter()
            .any(|stored| stored.username() == user.username())
        {
            return Err(UserPersistenceError::DuplicateUsername {
                username: user.username().to_string(),
            });
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| user_lock_poisoned())?;
        Ok(users
            .iter()
            .find(|stored| stored.username() == username)
            .cloned())
    }
}
