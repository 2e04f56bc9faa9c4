//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and stay testable against in-memory stores.

use std::sync::Arc;

use crate::domain::ports::{NoteRepository, UserRepository};
use crate::domain::{AccountService, NoteService};
use crate::outbound::persistence::{InMemoryNoteRepository, InMemoryUserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub notes: NoteService,
    pub accounts: AccountService,
}

impl HttpState {
    /// Construct state over the given repositories.
    pub fn new(notes: Arc<dyn NoteRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            notes: NoteService::new(notes),
            accounts: AccountService::new(users),
        }
    }

    /// Construct state over fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryNoteRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
