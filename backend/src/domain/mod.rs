//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod note;
pub mod notes;
pub mod ports;
pub mod slug;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError, PasswordDigest};
pub use self::error::{Error, ErrorCode};
pub use self::note::{Note, NoteBody, NoteDraft, NoteTitle, NoteValidationError};
pub use self::notes::NoteService;
pub use self::slug::{Slug, SlugValidationError};
pub use self::user::{User, UserId, Username, UserValidationError};

/// Convenient result alias for operations that surface domain errors.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
