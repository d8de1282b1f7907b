//! Keyword expansion for comma-separated search input.

use std::fmt;

use serde::Serialize;

use crate::CoreError;

/// A single trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyKeyword`] if `raw` is blank after trimming.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyKeyword);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits `"coach, Arzt,,Trainer "` into `[coach, Arzt, Trainer]`.
///
/// Input order is kept and duplicates are not removed; deduplication happens
/// per place, not per keyword.
#[must_use]
pub fn expand_queries(raw: &str) -> Vec<Keyword> {
    raw.split(',').filter_map(|s| Keyword::new(s).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(Keyword::as_str).collect()
    }

    #[test]
    fn expands_and_trims() {
        let kws = expand_queries(" coach ,Arzt,Trainer");
        assert_eq!(strings(&kws), vec!["coach", "Arzt", "Trainer"]);
    }

    #[test]
    fn drops_empty_segments() {
        let kws = expand_queries(",coach,, ,Arzt,");
        assert_eq!(strings(&kws), vec!["coach", "Arzt"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let kws = expand_queries("coach,Arzt,coach");
        assert_eq!(strings(&kws), vec!["coach", "Arzt", "coach"]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(expand_queries("").is_empty());
        assert!(expand_queries("  ,  ").is_empty());
    }

    #[test]
    fn keyword_rejects_blank() {
        assert_eq!(Keyword::new("   "), Err(CoreError::EmptyKeyword));
    }

    #[test]
    fn keyword_keeps_inner_whitespace() {
        let kw = Keyword::new("  personal trainer ").unwrap();
        assert_eq!(kw.as_str(), "personal trainer");
        assert_eq!(kw.to_string(), "personal trainer");
    }
}
