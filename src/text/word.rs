use std::fmt;
use std::ops::Deref;

use thiserror::Error;

/// Rejected tree key
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Empty or whitespace-only key
    #[error("key is empty")]
    Empty,

    /// Key contains characters other than `a-z`
    #[error("key {0:?} is not normalized (expected only lowercase a-z)")]
    NotNormalized(String),
}

/// A normalized word: non-empty, lowercase ASCII letters only
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(transparent))]
pub struct Word(String);

impl Word {
    /// Validate an already-normalized token
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        if raw.trim().is_empty() {
            return Err(KeyError::Empty);
        }
        if !raw.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(KeyError::NotNormalized(raw.to_owned()));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow as `&str`
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Word {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_lowercase() {
        let word = Word::parse("river").expect("valid word");
        assert_eq!(word.as_str(), "river");
        assert_eq!(word.len(), 5);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Word::parse(""), Err(KeyError::Empty));
        assert_eq!(Word::parse("  \t"), Err(KeyError::Empty));
    }

    #[test]
    fn test_parse_rejects_unnormalized() {
        assert_eq!(
            Word::parse("River"),
            Err(KeyError::NotNormalized("River".into()))
        );
        assert!(matches!("it's".parse::<Word>(), Err(KeyError::NotNormalized(_))));
        assert!(Word::parse("two words").is_err());
    }
}
