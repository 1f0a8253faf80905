//! Person-like directory entities.
//!
//! # Responsibility
//! - Define the shared `Person` record and the three typed roles built on it.
//! - Expose the identity rule used by every uniqueness check.
//!
//! # Invariants
//! - Identity is `name` (case-insensitive) plus `phone`; other fields never
//!   participate in uniqueness.
//! - Entities are immutable after construction; edits build a replacement.

use crate::model::fields::{
    Address, Block, Description, Email, Level, Matric, Name, Phone, Room, StaffDesignation,
    StudentDesignation, Tag,
};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Identity-bearing entity stored in a uniqueness-constrained collection.
pub trait Identified {
    /// Returns the shared person record carrying identity fields.
    fn person(&self) -> &Person;

    /// Returns whether both entities denote the same person.
    fn is_same_person(&self, other: &Self) -> bool {
        self.person().has_identity(other.person().name(), other.person().phone())
    }
}

/// Identity key used by event members to reference a person weakly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonRef {
    pub name: Name,
    pub phone: Phone,
}

impl PersonRef {
    /// Identity comparison, case-insensitive on name.
    pub fn refers_to(&self, other: &PersonRef) -> bool {
        self.name.matches_ignore_case(&other.name) && self.phone == other.phone
    }
}

impl Display for PersonRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)
    }
}

/// Common contact record every role carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Tags in label order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_identity(&self, name: &Name, phone: &Phone) -> bool {
        self.name.matches_ignore_case(name) && &self.phone == phone
    }

    pub fn to_ref(&self) -> PersonRef {
        PersonRef {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl Identified for Person {
    fn person(&self) -> &Person {
        self
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}",
            self.name, self.phone, self.email
        )
    }
}

/// Resident student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub person: Person,
    pub matric: Matric,
    /// Emergency contact number; optional on entry.
    pub emergency: Option<Phone>,
    pub block: Block,
    pub level: Level,
    pub room: Room,
    pub designation: StudentDesignation,
}

/// Residence staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub person: Person,
    pub designation: StaffDesignation,
}

/// Contact outside the residence, e.g. a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalParty {
    pub person: Person,
    pub description: Description,
}

impl Identified for Student {
    fn person(&self) -> &Person {
        &self.person
    }
}

impl Identified for Staff {
    fn person(&self) -> &Person {
        &self.person
    }
}

impl Identified for ExternalParty {
    fn person(&self) -> &Person {
        &self.person
    }
}

/// Closed set of typed roles sharing one identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Student(Student),
    Staff(Staff),
    ExternalParty(ExternalParty),
}

impl Contact {
    pub fn person(&self) -> &Person {
        match self {
            Self::Student(student) => &student.person,
            Self::Staff(staff) => &staff.person,
            Self::ExternalParty(party) => &party.person,
        }
    }

    /// Human-readable role label, e.g. `Student` or `Block IC`.
    pub fn role_label(&self) -> &'static str {
        match self {
            Self::Student(_) => "Student",
            Self::Staff(staff) => staff.designation.label(),
            Self::ExternalParty(_) => "External Party",
        }
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.person())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, phone: &str, address: &str) -> Person {
        Person::new(
            Name::parse(name).unwrap(),
            Phone::parse(phone).unwrap(),
            Email::parse("someone@u.edu").unwrap(),
            Address::parse(address).unwrap(),
            [Tag::parse("friends").unwrap()],
        )
    }

    #[test]
    fn identity_ignores_name_case_and_non_identity_fields() {
        let first = person("Alice Pauline", "94351253", "Blk 30");
        let second = person("alice pauline", "94351253", "Elsewhere 5");
        assert!(first.is_same_person(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn identity_requires_matching_phone() {
        let first = person("Alice", "94351253", "Blk 30");
        let second = person("Alice", "94351254", "Blk 30");
        assert!(!first.is_same_person(&second));
    }

    #[test]
    fn display_matches_feedback_layout() {
        let alice = person("Alice", "94351253", "Blk 30");
        assert_eq!(alice.to_string(), "Alice; Phone: 94351253; Email: someone@u.edu");
    }

    #[test]
    fn contact_exposes_role_label_by_variant() {
        let staff = Contact::Staff(Staff {
            person: person("Bob", "93210283", "Blk 1"),
            designation: StaffDesignation::ResidenceMaster,
        });
        assert_eq!(staff.role_label(), "Residence Master");
        assert_eq!(staff.person().name().as_str(), "Bob");
    }
}
