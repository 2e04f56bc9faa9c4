//! Persistence adapters.

pub mod memory;

pub use self::memory::{InMemoryNoteRepository, InMemoryUserRepository};
