//! Ordered collection that rejects two entries with the same identity.
//!
//! # Invariants
//! - No two elements satisfy `Identified::is_same_person`.
//! - Insertion order is preserved by every mutation.
//! - A failed mutation leaves the list unchanged.

use crate::model::person::Identified;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Uniqueness/existence violations raised by the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// An entry with the same identity already exists.
    Duplicate,
    /// No entry with the requested identity exists.
    NotFound,
    /// Position is past the end of the collection.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "Operation would result in duplicate persons"),
            Self::NotFound => write!(f, "Person not found"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} entries")
            }
        }
    }
}

impl Error for DirectoryError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified + Clone> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list, rejecting input that repeats an identity.
    pub fn try_from_vec(items: Vec<T>) -> Result<Self, DirectoryError> {
        if !Self::all_unique(&items) {
            return Err(DirectoryError::Duplicate);
        }
        Ok(Self { items })
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.items.iter().any(|item| item.is_same_person(candidate))
    }

    pub fn add(&mut self, item: T) -> Result<(), DirectoryError> {
        if self.contains(&item) {
            return Err(DirectoryError::Duplicate);
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the first entry with `target`'s identity.
    pub fn remove(&mut self, target: &T) -> Result<T, DirectoryError> {
        let position = self.position_of(target).ok_or(DirectoryError::NotFound)?;
        Ok(self.items.remove(position))
    }

    /// Removes the entry at `index` (zero-based).
    pub fn remove_at(&mut self, index: usize) -> Result<T, DirectoryError> {
        if index >= self.items.len() {
            return Err(DirectoryError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Replaces `target` in place; `replacement` may keep `target`'s identity.
    pub fn replace(&mut self, target: &T, replacement: T) -> Result<(), DirectoryError> {
        let position = self.position_of(target).ok_or(DirectoryError::NotFound)?;
        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(idx, item)| idx != position && item.is_same_person(&replacement));
        if collides {
            return Err(DirectoryError::Duplicate);
        }
        self.items[position] = replacement;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position_of(&self, target: &T) -> Option<usize> {
        self.items.iter().position(|item| item.is_same_person(target))
    }

    fn all_unique(items: &[T]) -> bool {
        items.iter().enumerate().all(|(idx, item)| {
            items[idx + 1..]
                .iter()
                .all(|other| !item.is_same_person(other))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::{Address, Email, Name, Phone};
    use crate::model::person::Person;

    fn person(name: &str, phone: &str) -> Person {
        Person::new(
            Name::parse(name).unwrap(),
            Phone::parse(phone).unwrap(),
            Email::parse("x@u.edu").unwrap(),
            Address::parse("Blk 1").unwrap(),
            Vec::new(),
        )
    }

    #[test]
    fn replace_keeps_position_and_allows_same_identity() {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")).unwrap();
        list.add(person("Bob", "222")).unwrap();
        list.add(person("Carl", "333")).unwrap();

        list.replace(&person("bob", "222"), person("BOB", "222"))
            .unwrap();
        let names: Vec<_> = list.as_slice().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Alice", "BOB", "Carl"]);
    }

    #[test]
    fn replace_with_colliding_identity_leaves_list_unchanged() {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")).unwrap();
        list.add(person("Bob", "222")).unwrap();
        let before = list.clone();

        let err = list
            .replace(&person("Alice", "111"), person("bob", "222"))
            .unwrap_err();
        assert_eq!(err, DirectoryError::Duplicate);
        assert_eq!(list, before);
    }

    #[test]
    fn remove_at_rejects_index_past_end() {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")).unwrap();
        let err = list.remove_at(1).unwrap_err();
        assert_eq!(err, DirectoryError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn try_from_vec_rejects_repeated_identity() {
        let err =
            UniqueList::try_from_vec(vec![person("Alice", "111"), person("ALICE", "111")])
                .unwrap_err();
        assert_eq!(err, DirectoryError::Duplicate);
    }
}
