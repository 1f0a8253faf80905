//! Field-keyed JSON records and their validated conversion to entities.
//!
//! # Invariants
//! - Entity -> record always succeeds; designations are stored as ordinals.
//! - Record -> entity checks fields in declaration order, tags first. The
//!   first missing field or first invalid field fails the record.

use crate::model::directory::{Directory, DirectorySnapshot};
use crate::model::event::{Event, EventValidationError};
use crate::model::fields::{
    Address, Block, Description, Email, EventName, EventTime, FieldError, Level, Matric, Name,
    Phone, Room, StaffDesignation, StudentDesignation, Tag,
};
use crate::model::person::{ExternalParty, Person, PersonRef, Staff, Student};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A stored record failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Required field absent (or `null`) in the record.
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    /// Field present but fails its predicate.
    InvalidField(FieldError),
    /// Event-level rule broken, e.g. start not before end.
    InvalidEvent(EventValidationError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { kind, field } => write!(f, "{kind}'s {field} field is missing!"),
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::InvalidEvent(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField { .. } => None,
            Self::InvalidField(err) => Some(err),
            Self::InvalidEvent(err) => Some(err),
        }
    }
}

impl From<FieldError> for RecordError {
    fn from(value: FieldError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<EventValidationError> for RecordError {
    fn from(value: EventValidationError) -> Self {
        Self::InvalidEvent(value)
    }
}

type RecordResult<T> = Result<T, RecordError>;

fn require<T>(
    raw: Option<&str>,
    kind: &'static str,
    field: &'static str,
    parse: fn(&str) -> Result<T, FieldError>,
) -> RecordResult<T> {
    let value = raw.ok_or(RecordError::MissingField { kind, field })?;
    Ok(parse(value)?)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub label: String,
}

/// Fields every person-like record carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tags: Vec<TagRecord>,
}

impl PersonRecord {
    pub fn from_model(person: &Person) -> Self {
        Self {
            name: Some(person.name().to_string()),
            phone: Some(person.phone().to_string()),
            email: Some(person.email().to_string()),
            address: Some(person.address().to_string()),
            tags: person
                .tags()
                .iter()
                .map(|tag| TagRecord {
                    label: tag.to_string(),
                })
                .collect(),
        }
    }

    /// Validates the shared fields, reporting missing ones against `kind`.
    fn to_person(&self, kind: &'static str) -> RecordResult<Person> {
        let tags = self
            .tags
            .iter()
            .map(|tag| Tag::parse(&tag.label))
            .collect::<Result<Vec<_>, _>>()?;
        let name = require(self.name.as_deref(), kind, "Name", Name::parse)?;
        let phone = require(self.phone.as_deref(), kind, "Phone", Phone::parse)?;
        let email = require(self.email.as_deref(), kind, "Email", Email::parse)?;
        let address = require(self.address.as_deref(), kind, "Address", Address::parse)?;
        Ok(Person::new(name, phone, email, address, tags))
    }

    pub fn to_model(&self) -> RecordResult<Person> {
        self.to_person("Person")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub matric: Option<String>,
    pub emergency: Option<String>,
    pub block: Option<String>,
    pub level: Option<String>,
    pub room: Option<String>,
    pub designation: Option<String>,
}

impl StudentRecord {
    const KIND: &'static str = "Student";

    pub fn from_model(student: &Student) -> Self {
        Self {
            person: PersonRecord::from_model(&student.person),
            matric: Some(student.matric.to_string()),
            emergency: student.emergency.as_ref().map(ToString::to_string),
            block: Some(student.block.to_string()),
            level: Some(student.level.to_string()),
            room: Some(student.room.to_string()),
            designation: Some(student.designation.ordinal().to_string()),
        }
    }

    pub fn to_model(&self) -> RecordResult<Student> {
        let person = self.person.to_person(Self::KIND)?;
        let matric = require(self.matric.as_deref(), Self::KIND, "Matric", Matric::parse)?;
        let emergency = self.emergency.as_deref().map(Phone::parse).transpose()?;
        let block = require(self.block.as_deref(), Self::KIND, "Block", Block::parse)?;
        let level = require(self.level.as_deref(), Self::KIND, "Level", Level::parse)?;
        let room = require(self.room.as_deref(), Self::KIND, "Room", Room::parse)?;
        let designation = require(
            self.designation.as_deref(),
            Self::KIND,
            "StudentDesignation",
            StudentDesignation::parse,
        )?;
        Ok(Student {
            person,
            matric,
            emergency,
            block,
            level,
            room,
            designation,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffRecord {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub designation: Option<String>,
}

impl StaffRecord {
    const KIND: &'static str = "Staff";

    pub fn from_model(staff: &Staff) -> Self {
        Self {
            person: PersonRecord::from_model(&staff.person),
            designation: Some(staff.designation.ordinal().to_string()),
        }
    }

    pub fn to_model(&self) -> RecordResult<Staff> {
        let person = self.person.to_person(Self::KIND)?;
        let designation = require(
            self.designation.as_deref(),
            Self::KIND,
            "StaffDesignation",
            StaffDesignation::parse,
        )?;
        Ok(Staff {
            person,
            designation,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalPartyRecord {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub description: Option<String>,
}

impl ExternalPartyRecord {
    const KIND: &'static str = "ExternalParty";

    pub fn from_model(party: &ExternalParty) -> Self {
        Self {
            person: PersonRecord::from_model(&party.person),
            description: Some(party.description.to_string()),
        }
    }

    pub fn to_model(&self) -> RecordResult<ExternalParty> {
        let person = self.person.to_person(Self::KIND)?;
        let description = require(
            self.description.as_deref(),
            Self::KIND,
            "Description",
            Description::parse,
        )?;
        Ok(ExternalParty {
            person,
            description,
        })
    }
}

/// Identity reference to an event member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl MemberRecord {
    const KIND: &'static str = "Member";

    fn to_model(&self) -> RecordResult<PersonRef> {
        Ok(PersonRef {
            name: require(self.name.as_deref(), Self::KIND, "Name", Name::parse)?,
            phone: require(self.phone.as_deref(), Self::KIND, "Phone", Phone::parse)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRecord {
    pub event_name: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub members: Option<Vec<MemberRecord>>,
}

impl EventRecord {
    const KIND: &'static str = "Event";

    pub fn from_model(event: &Event) -> Self {
        Self {
            event_name: Some(event.name().to_string()),
            start: Some(event.start().to_string()),
            end: Some(event.end().to_string()),
            members: Some(
                event
                    .members()
                    .iter()
                    .map(|member| MemberRecord {
                        name: Some(member.name.to_string()),
                        phone: Some(member.phone.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    pub fn to_model(&self) -> RecordResult<Event> {
        let name = require(
            self.event_name.as_deref(),
            Self::KIND,
            "EventName",
            EventName::parse,
        )?;
        let start = require(self.start.as_deref(), Self::KIND, "StartTime", EventTime::parse)?;
        let end = require(self.end.as_deref(), Self::KIND, "EndTime", EventTime::parse)?;
        let members = self
            .members
            .as_ref()
            .ok_or(RecordError::MissingField {
                kind: Self::KIND,
                field: "Members",
            })?
            .iter()
            .map(MemberRecord::to_model)
            .collect::<RecordResult<Vec<_>>>()?;
        Ok(Event::new(name, start, end, members)?)
    }
}

/// Whole persisted document; every list defaults to empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectoryDocument {
    pub persons: Vec<PersonRecord>,
    pub staff: Vec<StaffRecord>,
    pub students: Vec<StudentRecord>,
    pub external_parties: Vec<ExternalPartyRecord>,
    pub events: Vec<EventRecord>,
}

impl DirectoryDocument {
    pub fn from_directory(directory: &Directory) -> Self {
        Self {
            persons: directory.persons().iter().map(PersonRecord::from_model).collect(),
            staff: directory.staff().iter().map(StaffRecord::from_model).collect(),
            students: directory
                .students()
                .iter()
                .map(StudentRecord::from_model)
                .collect(),
            external_parties: directory
                .external_parties()
                .iter()
                .map(ExternalPartyRecord::from_model)
                .collect(),
            events: directory.events().iter().map(EventRecord::from_model).collect(),
        }
    }

    /// Converts every record, failing on the first invalid one.
    pub fn to_snapshot(&self) -> RecordResult<DirectorySnapshot> {
        Ok(DirectorySnapshot {
            persons: self
                .persons
                .iter()
                .map(PersonRecord::to_model)
                .collect::<RecordResult<_>>()?,
            staff: self
                .staff
                .iter()
                .map(StaffRecord::to_model)
                .collect::<RecordResult<_>>()?,
            students: self
                .students
                .iter()
                .map(StudentRecord::to_model)
                .collect::<RecordResult<_>>()?,
            external_parties: self
                .external_parties
                .iter()
                .map(ExternalPartyRecord::to_model)
                .collect::<RecordResult<_>>()?,
            events: self
                .events
                .iter()
                .map(EventRecord::to_model)
                .collect::<RecordResult<_>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student_json() -> serde_json::Value {
        json!({
            "name": "John Doe",
            "phone": "98765432",
            "email": "john@u.edu",
            "address": "21 Lower Kent Ridge",
            "tags": [{"label": "floorhead"}],
            "matric": "A1234567B",
            "emergency": null,
            "block": "A",
            "level": "4",
            "room": "01",
            "designation": "1"
        })
    }

    #[test]
    fn student_record_round_trips_through_model() {
        let record: StudentRecord = serde_json::from_value(student_json()).unwrap();
        let student = record.to_model().unwrap();
        assert_eq!(student.designation, StudentDesignation::FloorHead);
        assert_eq!(student.room.as_str(), "01");
        assert!(student.emergency.is_none());
        assert_eq!(StudentRecord::from_model(&student), record);
    }

    #[test]
    fn missing_field_is_named_with_entity_kind() {
        let mut value = student_json();
        value.as_object_mut().unwrap().remove("matric");
        let record: StudentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            record.to_model().unwrap_err().to_string(),
            "Student's Matric field is missing!"
        );
    }

    #[test]
    fn invalid_tag_is_reported_before_missing_name() {
        let mut value = student_json();
        let object = value.as_object_mut().unwrap();
        object.remove("name");
        object.insert("tags".into(), json!([{"label": "not valid"}]));
        let record: StudentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            record.to_model().unwrap_err(),
            RecordError::InvalidField(FieldError {
                field: "Tag",
                message: Tag::MESSAGE_CONSTRAINTS,
            })
        );
    }

    #[test]
    fn designation_out_of_range_fails_with_constraint_message() {
        let record: StaffRecord = serde_json::from_value(json!({
            "name": "Tan Ah Kow",
            "phone": "61234567",
            "email": "tan@u.edu",
            "address": "Office",
            "designation": "3"
        }))
        .unwrap();
        assert_eq!(
            record.to_model().unwrap_err().to_string(),
            StaffDesignation::MESSAGE_CONSTRAINTS
        );
    }

    #[test]
    fn event_record_requires_window_and_members() {
        let reversed: EventRecord = serde_json::from_value(json!({
            "eventName": "Dinner",
            "start": "2026-03-01 21:00",
            "end": "2026-03-01 18:00",
            "members": [{"name": "John Doe", "phone": "98765432"}]
        }))
        .unwrap();
        assert_eq!(
            reversed.to_model().unwrap_err(),
            RecordError::InvalidEvent(EventValidationError::InvalidWindow)
        );

        let no_members: EventRecord = serde_json::from_value(json!({
            "eventName": "Dinner",
            "start": "2026-03-01 18:00",
            "end": "2026-03-01 21:00"
        }))
        .unwrap();
        assert_eq!(
            no_members.to_model().unwrap_err().to_string(),
            "Event's Members field is missing!"
        );
    }

    #[test]
    fn absent_lists_default_to_empty() {
        let document: DirectoryDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(document.to_snapshot().unwrap(), DirectorySnapshot::default());
    }
}
