//! One-based list position as typed by the user.

use std::fmt::{Display, Formatter};

/// Position in a displayed list. Stored zero-based, shown one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for zero, which has no one-based meaning.
    pub fn from_one_based(value: usize) -> Option<Self> {
        value.checked_sub(1).map(Self)
    }

    pub fn from_zero_based(value: usize) -> Self {
        Self(value)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }

    /// Parses a strictly positive decimal integer, ignoring surrounding space.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        trimmed.parse::<usize>().ok().and_then(Self::from_one_based)
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::Index;

    #[test]
    fn parse_accepts_positive_integers_only() {
        assert_eq!(Index::parse(" 3 ").map(Index::zero_based), Some(2));
        assert_eq!(Index::parse("0"), None);
        assert_eq!(Index::parse("-1"), None);
        assert_eq!(Index::parse("+1"), None);
        assert_eq!(Index::parse("1 2"), None);
        assert_eq!(Index::parse(""), None);
    }
}
