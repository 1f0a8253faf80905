//! Execution context wrapping the aggregate with per-collection filters.
//!
//! # Responsibility
//! - Hold the directory plus the predicate currently narrowing each list.
//! - Track which list the front end is displaying.
//!
//! # Invariants
//! - Filtered views are recomputed from the aggregate on every read.
//! - Filters never mutate the underlying collections.

use crate::model::directory::Directory;
use crate::model::event::Event;
use crate::model::person::{ExternalParty, Staff, Student};

/// List currently presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Students,
    Staff,
    ExternalParties,
    Events,
}

/// Optional predicate narrowing one ordered collection.
pub struct FilteredView<T> {
    predicate: Option<Box<dyn Fn(&T) -> bool>>,
}

impl<T> Default for FilteredView<T> {
    fn default() -> Self {
        Self { predicate: None }
    }
}

impl<T> FilteredView<T> {
    pub fn set(&mut self, predicate: impl Fn(&T) -> bool + 'static) {
        self.predicate = Some(Box::new(predicate));
    }

    pub fn clear(&mut self) {
        self.predicate = None;
    }

    pub fn is_filtered(&self) -> bool {
        self.predicate.is_some()
    }

    /// Returns matching items in collection order.
    pub fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        match &self.predicate {
            Some(predicate) => items.iter().filter(|item| predicate(*item)).collect(),
            None => items.iter().collect(),
        }
    }
}

#[derive(Default)]
pub struct ModelManager {
    directory: Directory,
    students: FilteredView<Student>,
    staff: FilteredView<Staff>,
    external_parties: FilteredView<ExternalParty>,
    events: FilteredView<Event>,
    list_kind: ListKind,
}

impl ModelManager {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn list_kind(&self) -> ListKind {
        self.list_kind
    }

    pub fn set_list_kind(&mut self, kind: ListKind) {
        self.list_kind = kind;
    }

    pub fn filtered_students(&self) -> Vec<&Student> {
        self.students.apply(self.directory.students())
    }

    pub fn filtered_staff(&self) -> Vec<&Staff> {
        self.staff.apply(self.directory.staff())
    }

    pub fn filtered_external_parties(&self) -> Vec<&ExternalParty> {
        self.external_parties.apply(self.directory.external_parties())
    }

    pub fn filtered_events(&self) -> Vec<&Event> {
        self.events.apply(self.directory.events())
    }

    pub fn filter_students(&mut self, predicate: impl Fn(&Student) -> bool + 'static) {
        self.students.set(predicate);
    }

    pub fn filter_staff(&mut self, predicate: impl Fn(&Staff) -> bool + 'static) {
        self.staff.set(predicate);
    }

    pub fn filter_external_parties(&mut self, predicate: impl Fn(&ExternalParty) -> bool + 'static) {
        self.external_parties.set(predicate);
    }

    pub fn filter_events(&mut self, predicate: impl Fn(&Event) -> bool + 'static) {
        self.events.set(predicate);
    }

    pub fn show_all_students(&mut self) {
        self.students.clear();
    }

    pub fn show_all_staff(&mut self) {
        self.staff.clear();
    }

    pub fn show_all_external_parties(&mut self) {
        self.external_parties.clear();
    }

    pub fn show_all_events(&mut self) {
        self.events.clear();
    }

    /// Drops every filter, e.g. after a full reset.
    pub fn show_all(&mut self) {
        self.show_all_students();
        self.show_all_staff();
        self.show_all_external_parties();
        self.show_all_events();
    }
}

#[cfg(test)]
mod tests {
    use super::FilteredView;

    #[test]
    fn filtered_view_preserves_order_and_source() {
        let items = vec![1, 2, 3, 4, 5];
        let mut view = FilteredView::default();
        view.set(|value: &i32| value % 2 == 1);
        assert_eq!(view.apply(&items), vec![&1, &3, &5]);
        assert_eq!(items.len(), 5);

        view.clear();
        assert!(!view.is_filtered());
        assert_eq!(view.apply(&items).len(), 5);
    }
}
