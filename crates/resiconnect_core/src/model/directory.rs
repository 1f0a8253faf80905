//! Directory aggregate owning every entity collection.
//!
//! # Responsibility
//! - Own persons, staff, students, external parties and events.
//! - Enforce identity uniqueness and existence on every mutation.
//! - Notify subscribers after each applied change.
//!
//! # Invariants
//! - Each person-like collection is duplicate-free by identity.
//! - Events carry no uniqueness constraint.
//! - `reset` validates the full snapshot before touching current state.
//! - Rejected mutations leave state unchanged and notify nobody.

use crate::model::event::Event;
use crate::model::person::{Contact, ExternalParty, Person, PersonRef, Staff, Student};
use crate::model::unique_list::{DirectoryError, UniqueList};
use log::debug;
use std::fmt::{Debug, Formatter};

/// Collection touched by a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Persons,
    Staff,
    Students,
    ExternalParties,
    Events,
}

impl CollectionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Persons => "persons",
            Self::Staff => "staff",
            Self::Students => "students",
            Self::ExternalParties => "external_parties",
            Self::Events => "events",
        }
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryChange {
    Added(CollectionKind),
    Removed(CollectionKind),
    Replaced(CollectionKind),
    Reset,
}

type Listener = Box<dyn Fn(&DirectoryChange)>;

/// Plain ordered copy of every collection, used for reset and persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub persons: Vec<Person>,
    pub staff: Vec<Staff>,
    pub students: Vec<Student>,
    pub external_parties: Vec<ExternalParty>,
    pub events: Vec<Event>,
}

#[derive(Default)]
pub struct Directory {
    persons: UniqueList<Person>,
    staff: UniqueList<Staff>,
    students: UniqueList<Student>,
    external_parties: UniqueList<ExternalParty>,
    events: Vec<Event>,
    listeners: Vec<Listener>,
}

impl Debug for Directory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("persons", &self.persons)
            .field("staff", &self.staff)
            .field("students", &self.students)
            .field("external_parties", &self.external_parties)
            .field("events", &self.events)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from a snapshot, rejecting duplicate identities.
    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        directory.reset(snapshot)?;
        Ok(directory)
    }

    /// Registers a callback invoked after every applied mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&DirectoryChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces all five collections at once.
    pub fn reset(&mut self, snapshot: DirectorySnapshot) -> Result<(), DirectoryError> {
        let persons = UniqueList::try_from_vec(snapshot.persons)?;
        let staff = UniqueList::try_from_vec(snapshot.staff)?;
        let students = UniqueList::try_from_vec(snapshot.students)?;
        let external_parties = UniqueList::try_from_vec(snapshot.external_parties)?;

        self.persons = persons;
        self.staff = staff;
        self.students = students;
        self.external_parties = external_parties;
        self.events = snapshot.events;
        self.notify(DirectoryChange::Reset);
        Ok(())
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            persons: self.persons.as_slice().to_vec(),
            staff: self.staff.as_slice().to_vec(),
            students: self.students.as_slice().to_vec(),
            external_parties: self.external_parties.as_slice().to_vec(),
            events: self.events.clone(),
        }
    }

    pub fn persons(&self) -> &[Person] {
        self.persons.as_slice()
    }

    pub fn staff(&self) -> &[Staff] {
        self.staff.as_slice()
    }

    pub fn students(&self) -> &[Student] {
        self.students.as_slice()
    }

    pub fn external_parties(&self) -> &[ExternalParty] {
        self.external_parties.as_slice()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), DirectoryError> {
        self.persons.add(person)?;
        self.notify(DirectoryChange::Added(CollectionKind::Persons));
        Ok(())
    }

    pub fn remove_person(&mut self, target: &Person) -> Result<Person, DirectoryError> {
        let removed = self.persons.remove(target)?;
        self.notify(DirectoryChange::Removed(CollectionKind::Persons));
        Ok(removed)
    }

    pub fn replace_person(
        &mut self,
        target: &Person,
        replacement: Person,
    ) -> Result<(), DirectoryError> {
        self.persons.replace(target, replacement)?;
        self.notify(DirectoryChange::Replaced(CollectionKind::Persons));
        Ok(())
    }

    pub fn has_staff(&self, staff: &Staff) -> bool {
        self.staff.contains(staff)
    }

    pub fn add_staff(&mut self, staff: Staff) -> Result<(), DirectoryError> {
        self.staff.add(staff)?;
        self.notify(DirectoryChange::Added(CollectionKind::Staff));
        Ok(())
    }

    pub fn remove_staff(&mut self, target: &Staff) -> Result<Staff, DirectoryError> {
        let removed = self.staff.remove(target)?;
        self.notify(DirectoryChange::Removed(CollectionKind::Staff));
        Ok(removed)
    }

    pub fn replace_staff(&mut self, target: &Staff, replacement: Staff) -> Result<(), DirectoryError> {
        self.staff.replace(target, replacement)?;
        self.notify(DirectoryChange::Replaced(CollectionKind::Staff));
        Ok(())
    }

    pub fn has_student(&self, student: &Student) -> bool {
        self.students.contains(student)
    }

    pub fn add_student(&mut self, student: Student) -> Result<(), DirectoryError> {
        self.students.add(student)?;
        self.notify(DirectoryChange::Added(CollectionKind::Students));
        Ok(())
    }

    pub fn remove_student(&mut self, target: &Student) -> Result<Student, DirectoryError> {
        let removed = self.students.remove(target)?;
        self.notify(DirectoryChange::Removed(CollectionKind::Students));
        Ok(removed)
    }

    pub fn replace_student(
        &mut self,
        target: &Student,
        replacement: Student,
    ) -> Result<(), DirectoryError> {
        self.students.replace(target, replacement)?;
        self.notify(DirectoryChange::Replaced(CollectionKind::Students));
        Ok(())
    }

    pub fn has_external_party(&self, party: &ExternalParty) -> bool {
        self.external_parties.contains(party)
    }

    pub fn add_external_party(&mut self, party: ExternalParty) -> Result<(), DirectoryError> {
        self.external_parties.add(party)?;
        self.notify(DirectoryChange::Added(CollectionKind::ExternalParties));
        Ok(())
    }

    pub fn remove_external_party(
        &mut self,
        target: &ExternalParty,
    ) -> Result<ExternalParty, DirectoryError> {
        let removed = self.external_parties.remove(target)?;
        self.notify(DirectoryChange::Removed(CollectionKind::ExternalParties));
        Ok(removed)
    }

    pub fn replace_external_party(
        &mut self,
        target: &ExternalParty,
        replacement: ExternalParty,
    ) -> Result<(), DirectoryError> {
        self.external_parties.replace(target, replacement)?;
        self.notify(DirectoryChange::Replaced(CollectionKind::ExternalParties));
        Ok(())
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
        self.notify(DirectoryChange::Added(CollectionKind::Events));
    }

    /// Removes the first event equal to `target`.
    pub fn remove_event(&mut self, target: &Event) -> Result<Event, DirectoryError> {
        let position = self
            .events
            .iter()
            .position(|event| event == target)
            .ok_or(DirectoryError::NotFound)?;
        self.remove_event_at(position)
    }

    /// Removes the event at zero-based `index`.
    pub fn remove_event_at(&mut self, index: usize) -> Result<Event, DirectoryError> {
        self.check_event_index(index)?;
        let removed = self.events.remove(index);
        self.notify(DirectoryChange::Removed(CollectionKind::Events));
        Ok(removed)
    }

    /// Replaces the event at zero-based `index`.
    pub fn set_event(&mut self, index: usize, event: Event) -> Result<(), DirectoryError> {
        self.check_event_index(index)?;
        self.events[index] = event;
        self.notify(DirectoryChange::Replaced(CollectionKind::Events));
        Ok(())
    }

    /// Resolves a weak member reference against the typed collections.
    pub fn find_contact(&self, member: &PersonRef) -> Option<Contact> {
        let matches = |person: &Person| person.has_identity(&member.name, &member.phone);
        if let Some(student) = self.students().iter().find(|s| matches(&s.person)) {
            return Some(Contact::Student(student.clone()));
        }
        if let Some(staff) = self.staff().iter().find(|s| matches(&s.person)) {
            return Some(Contact::Staff(staff.clone()));
        }
        self.external_parties()
            .iter()
            .find(|p| matches(&p.person))
            .map(|party| Contact::ExternalParty(party.clone()))
    }

    fn check_event_index(&self, index: usize) -> Result<(), DirectoryError> {
        if index >= self.events.len() {
            return Err(DirectoryError::IndexOutOfRange {
                index,
                len: self.events.len(),
            });
        }
        Ok(())
    }

    fn notify(&self, change: DirectoryChange) {
        let collection = match change {
            DirectoryChange::Added(kind)
            | DirectoryChange::Removed(kind)
            | DirectoryChange::Replaced(kind) => kind.as_str(),
            DirectoryChange::Reset => "all",
        };
        debug!(
            "event=directory_change module=model status=ok collection={} listeners={}",
            collection,
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::{
        Address, Description, Email, Name, Phone, StaffDesignation, Tag,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn person(name: &str, phone: &str) -> Person {
        Person::new(
            Name::parse(name).unwrap(),
            Phone::parse(phone).unwrap(),
            Email::parse("someone@u.edu").unwrap(),
            Address::parse("Block A").unwrap(),
            Vec::<Tag>::new(),
        )
    }

    fn staff(name: &str, phone: &str) -> Staff {
        Staff {
            person: person(name, phone),
            designation: StaffDesignation::SupportStaff,
        }
    }

    fn recorded(directory: &mut Directory) -> Rc<RefCell<Vec<DirectoryChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        directory.subscribe(move |change| sink.borrow_mut().push(*change));
        changes
    }

    #[test]
    fn listeners_see_applied_mutations_only() {
        let mut directory = Directory::new();
        let changes = recorded(&mut directory);

        directory.add_staff(staff("Mary Tan", "91234567")).unwrap();
        let duplicate = directory.add_staff(staff("MARY TAN", "91234567"));
        assert_eq!(duplicate, Err(DirectoryError::Duplicate));
        directory.remove_staff(&staff("mary tan", "91234567")).unwrap();

        assert_eq!(
            *changes.borrow(),
            vec![
                DirectoryChange::Added(CollectionKind::Staff),
                DirectoryChange::Removed(CollectionKind::Staff),
            ]
        );
    }

    #[test]
    fn reset_with_duplicates_keeps_current_state() {
        let mut directory = Directory::new();
        directory.add_person(person("Alice", "81112222")).unwrap();
        let changes = recorded(&mut directory);

        let snapshot = DirectorySnapshot {
            staff: vec![staff("Bob", "82223333")],
            external_parties: vec![
                ExternalParty {
                    person: person("Ah Kow", "67771234"),
                    description: Description::parse("Caterer").unwrap(),
                },
                ExternalParty {
                    person: person("ah kow", "67771234"),
                    description: Description::parse("Other").unwrap(),
                },
            ],
            ..DirectorySnapshot::default()
        };
        assert_eq!(directory.reset(snapshot), Err(DirectoryError::Duplicate));
        assert_eq!(directory.persons().len(), 1);
        assert!(directory.staff().is_empty());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn replace_keeps_position_and_rejects_collisions() {
        let mut directory = Directory::new();
        directory.add_staff(staff("Mary Tan", "91234567")).unwrap();
        directory.add_staff(staff("Bob Lim", "92345678")).unwrap();

        let promoted = Staff {
            designation: StaffDesignation::ResidenceMaster,
            ..staff("Mary Tan", "91234567")
        };
        directory
            .replace_staff(&staff("Mary Tan", "91234567"), promoted.clone())
            .unwrap();
        assert_eq!(directory.staff()[0], promoted);

        let collision =
            directory.replace_staff(&staff("Bob Lim", "92345678"), staff("Mary Tan", "91234567"));
        assert_eq!(collision, Err(DirectoryError::Duplicate));
        assert_eq!(directory.staff()[1], staff("Bob Lim", "92345678"));
    }

    #[test]
    fn event_index_is_bounds_checked() {
        let mut directory = Directory::new();
        assert_eq!(
            directory.remove_event_at(0),
            Err(DirectoryError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn find_contact_resolves_member_by_identity() {
        let mut directory = Directory::new();
        directory.add_staff(staff("Mary Tan", "91234567")).unwrap();

        let member = PersonRef {
            name: Name::parse("mary tan").unwrap(),
            phone: Phone::parse("91234567").unwrap(),
        };
        let contact = directory.find_contact(&member).unwrap();
        assert_eq!(contact.role_label(), "Support Staff");

        let stranger = PersonRef {
            name: Name::parse("Mary Tan").unwrap(),
            phone: Phone::parse("90000000").unwrap(),
        };
        assert!(directory.find_contact(&stranger).is_none());
    }
}
