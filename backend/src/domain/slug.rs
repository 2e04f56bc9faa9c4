//! Slug type, validation, and deterministic derivation from titles.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits, and hyphens. When the author does not propose one, a slug is
//! derived from the note title by transliterating Cyrillic text to ASCII and
//! collapsing everything else into hyphens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a slug, in bytes.
pub const SLUG_MAX: usize = 64;

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::TooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain lowercase ASCII letters, digits, and hyphens",
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// URL-safe unique identifier for a note.
///
/// ## Invariants
/// - Non-empty and at most [`SLUG_MAX`] bytes.
/// - Lowercase ASCII letters, digits, and hyphens only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`] from borrowed input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SlugValidationError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.len() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value.to_owned()))
    }

    /// Derive a slug from free-form text, deterministically.
    ///
    /// Lowercases the input, transliterates Cyrillic letters to ASCII, maps
    /// every other non-alphanumeric run to a single hyphen, and truncates to
    /// [`SLUG_MAX`] bytes. Falls back to `note` when nothing survives.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Slug;
    ///
    /// assert_eq!(Slug::derive("Weekly plan, draft 2").as_str(), "weekly-plan-draft-2");
    /// assert_eq!(Slug::derive("Заметки и планы").as_str(), "zametki-i-plany");
    /// ```
    pub fn derive(source: &str) -> Self {
        let mut out = String::with_capacity(source.len());
        let mut pending_hyphen = false;
        for ch in source.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(ch);
            } else if let Some(mapped) = transliterate(ch) {
                // Soft and hard signs map to nothing; they do not break a word.
                if mapped.is_empty() {
                    continue;
                }
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push_str(mapped);
            } else {
                pending_hyphen = true;
            }
        }

        // Everything pushed above is ASCII, so byte truncation is safe.
        out.truncate(SLUG_MAX);
        while out.ends_with('-') {
            out.pop();
        }
        if out.is_empty() {
            out.push_str("note");
        }
        Self(out)
    }

    /// Borrow the slug string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Lowercase Cyrillic to ASCII mapping used by [`Slug::derive`].
fn transliterate(ch: char) -> Option<&'static str> {
    Some(match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "jo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "ju",
        'я' => "ja",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", SlugValidationError::Empty)]
    #[case("Upper-Case", SlugValidationError::InvalidCharacters)]
    #[case("with space", SlugValidationError::InvalidCharacters)]
    #[case("underscore_s", SlugValidationError::InvalidCharacters)]
    fn invalid_slugs_are_rejected(#[case] raw: &str, #[case] expected: SlugValidationError) {
        let err = Slug::new(raw).expect_err("invalid input must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn overlong_slug_is_rejected() {
        let raw = "a".repeat(SLUG_MAX + 1);
        let err = Slug::new(raw).expect_err("overlong input must fail");
        assert_eq!(err, SlugValidationError::TooLong { max: SLUG_MAX });
    }

    #[rstest]
    #[case("note-slug")]
    #[case("2024-review")]
    #[case("a")]
    fn valid_slugs_round_trip(#[case] raw: &str) {
        let slug = Slug::new(raw).expect("valid input");
        assert_eq!(slug.as_str(), raw);
    }

    #[rstest]
    #[case("Hello, world!", "hello-world")]
    #[case("  spaced   out  ", "spaced-out")]
    #[case("Заголовок", "zagolovok")]
    #[case("Щи и борщ", "schi-i-borsch")]
    #[case("Подъезд", "podezd")]
    #[case("C++ и Rust", "c-i-rust")]
    fn derivation_is_deterministic(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(Slug::derive(source).as_str(), expected);
    }

    #[test]
    fn derivation_truncates_to_the_limit() {
        let source = "a ".repeat(SLUG_MAX);
        let slug = Slug::derive(&source);
        assert!(slug.as_str().len() <= SLUG_MAX);
        assert!(!slug.as_str().ends_with('-'));
    }

    #[test]
    fn derivation_falls_back_when_nothing_survives() {
        assert_eq!(Slug::derive("!!!").as_str(), "note");
    }

    #[test]
    fn derived_slugs_satisfy_validation() {
        let slug = Slug::derive("Список покупок на неделю");
        assert!(Slug::new(slug.as_str()).is_ok());
    }
}
