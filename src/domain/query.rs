// SPDX-License-Identifier: MPL-2.0
//! The user's natural-language math question.

use std::fmt;

/// A trimmed, non-empty question.
///
/// Blank input never becomes a `Query`, so every service call and history
/// entry downstream works with validated text.
///
/// # Example
///
/// ```
/// use mathlens::domain::Query;
///
/// let query = Query::parse("  matrix multiplication \n").unwrap();
/// assert_eq!(query.as_str(), "matrix multiplication");
/// assert!(Query::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims `raw` and returns `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let query = Query::parse("\t dot product  ").expect("valid query");
        assert_eq!(query.as_str(), "dot product");
    }

    #[test]
    fn parse_rejects_empty_and_whitespace_only() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("   ").is_none());
        assert!(Query::parse("\n\t ").is_none());
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let query = Query::parse("what is  a  limit").expect("valid query");
        assert_eq!(query.to_string(), "what is  a  limit");
    }
}
