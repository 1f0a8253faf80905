//! Student, staff and external-party commands.

use crate::command::{CommandError, CommandOutcome, CommandResult, IndexTarget};
use crate::index::Index;
use crate::model::fields::{StaffDesignation, StudentDesignation, Tag};
use crate::model::manager::{ListKind, ModelManager};
use crate::model::person::{ExternalParty, Person, Staff, Student};

pub const ADD_STUDENT_WORD: &str = "addstudent";
pub const ADD_STAFF_WORD: &str = "addstaff";
pub const ADD_EXTERNAL_PARTY_WORD: &str = "addexternalparty";
pub const DELETE_STUDENT_WORD: &str = "deletestudent";
pub const DELETE_STAFF_WORD: &str = "deletestaff";
pub const DELETE_EXTERNAL_PARTY_WORD: &str = "deleteexternalparty";
pub const LIST_STUDENT_WORD: &str = "liststudent";
pub const LIST_STAFF_WORD: &str = "liststaff";
pub const LIST_EXTERNAL_PARTY_WORD: &str = "listexternalparty";
pub const SEARCH_STUDENT_WORD: &str = "searchstudent";
pub const SEARCH_STAFF_WORD: &str = "searchstaff";
pub const SEARCH_EXTERNAL_PARTY_WORD: &str = "searchexternalparty";

pub const ADD_STUDENT_USAGE: &str = "addstudent: Adds a student to the address book. \
Parameters: name/NAME matric/MATRIC phone/PHONE email/EMAIL a/ADDRESS block/BLOCK level/LEVEL \
room/ROOM designation/DESIGNATION [emergency/PHONE] [t/TAG]...\n\
Example: addstudent name/John Doe matric/A1234567B phone/98765432 email/john@u.edu \
a/21 Lower Kent Ridge block/A level/4 room/01 designation/0";

pub const ADD_STAFF_USAGE: &str = "addstaff: Adds a staff member to the address book. \
Parameters: name/NAME phone/PHONE email/EMAIL a/ADDRESS designation/DESIGNATION [t/TAG]...\n\
Example: addstaff name/Mary Tan phone/91234567 email/mary@u.edu a/Block A Office designation/1";

pub const ADD_EXTERNAL_PARTY_USAGE: &str = "addexternalparty: Adds an external party to the \
address book. Parameters: name/NAME phone/PHONE email/EMAIL a/ADDRESS desc/DESCRIPTION [t/TAG]...\n\
Example: addexternalparty name/Ah Kow Catering phone/67771234 email/sales@ahkow.com \
a/5 Clementi Road desc/Supper caterer";

pub const DELETE_STUDENT_USAGE: &str = "deletestudent: Deletes the student identified by the \
index number used in the displayed student list.\nParameters: INDEX (must be a positive integer)\n\
Example: deletestudent 1";

pub const DELETE_STAFF_USAGE: &str = "deletestaff: Deletes the staff member identified by the \
index number used in the displayed staff list.\nParameters: INDEX (must be a positive integer)\n\
Example: deletestaff 1";

pub const DELETE_EXTERNAL_PARTY_USAGE: &str = "deleteexternalparty: Deletes the external party \
identified by the index number used in the displayed external party list.\n\
Parameters: INDEX (must be a positive integer)\nExample: deleteexternalparty 1";

pub const SEARCH_STUDENT_USAGE: &str = "searchstudent: Finds students matching every given \
attribute. Parameters (at least one): [name/NAME] [matric/MATRIC] [phone/PHONE] [email/EMAIL] \
[block/BLOCK] [level/LEVEL] [room/ROOM] [designation/DESIGNATION] [t/TAG]\n\
Example: searchstudent name/john block/A";

pub const SEARCH_STAFF_USAGE: &str = "searchstaff: Finds staff matching every given attribute. \
Parameters (at least one): [name/NAME] [phone/PHONE] [email/EMAIL] [designation/DESIGNATION] \
[t/TAG]\nExample: searchstaff designation/2";

pub const SEARCH_EXTERNAL_PARTY_USAGE: &str = "searchexternalparty: Finds external parties \
matching every given attribute. Parameters (at least one): [name/NAME] [phone/PHONE] \
[email/EMAIL] [desc/DESCRIPTION] [t/TAG]\nExample: searchexternalparty desc/caterer";

/// Keywords shared by every person search; text matches are
/// case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonCriteria {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tag: Option<Tag>,
}

impl PersonCriteria {
    pub fn matches(&self, person: &Person) -> bool {
        text_matches(&self.name, person.name().as_str())
            && text_matches(&self.phone, person.phone().as_str())
            && text_matches(&self.email, person.email().as_str())
            && self
                .tag
                .as_ref()
                .map_or(true, |tag| person.tags().contains(tag))
    }

    fn describe(&self, parts: &mut Vec<String>) {
        push_part(parts, "name", self.name.as_deref());
        push_part(parts, "phone", self.phone.as_deref());
        push_part(parts, "email", self.email.as_deref());
        push_part(parts, "tag", self.tag.as_ref().map(Tag::as_str));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub person: PersonCriteria,
    pub matric: Option<String>,
    pub block: Option<String>,
    pub level: Option<String>,
    pub room: Option<String>,
    pub designation: Option<StudentDesignation>,
}

impl StudentQuery {
    pub fn matches(&self, student: &Student) -> bool {
        self.person.matches(&student.person)
            && text_matches(&self.matric, student.matric.as_str())
            && text_matches(&self.block, student.block.as_str())
            && exact_matches(&self.level, student.level.as_str())
            && exact_matches(&self.room, student.room.as_str())
            && self.designation.map_or(true, |d| d == student.designation)
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        self.person.describe(&mut parts);
        push_part(&mut parts, "matric", self.matric.as_deref());
        push_part(&mut parts, "block", self.block.as_deref());
        push_part(&mut parts, "level", self.level.as_deref());
        push_part(&mut parts, "room", self.room.as_deref());
        push_part(&mut parts, "designation", self.designation.map(|d| d.label()));
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffQuery {
    pub person: PersonCriteria,
    pub designation: Option<StaffDesignation>,
}

impl StaffQuery {
    pub fn matches(&self, staff: &Staff) -> bool {
        self.person.matches(&staff.person)
            && self.designation.map_or(true, |d| d == staff.designation)
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        self.person.describe(&mut parts);
        push_part(&mut parts, "designation", self.designation.map(|d| d.label()));
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalPartyQuery {
    pub person: PersonCriteria,
    pub description: Option<String>,
}

impl ExternalPartyQuery {
    pub fn matches(&self, party: &ExternalParty) -> bool {
        self.person.matches(&party.person)
            && text_matches(&self.description, party.description.as_str())
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        self.person.describe(&mut parts);
        push_part(&mut parts, "description", self.description.as_deref());
        parts.join(", ")
    }
}

fn text_matches(keyword: &Option<String>, value: &str) -> bool {
    keyword
        .as_ref()
        .map_or(true, |keyword| value.to_lowercase().contains(&keyword.to_lowercase()))
}

fn exact_matches(keyword: &Option<String>, value: &str) -> bool {
    keyword.as_ref().map_or(true, |keyword| keyword == value)
}

fn push_part(parts: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        parts.push(format!("{label}: {value}"));
    }
}

pub(crate) fn add_student(model: &mut ModelManager, student: &Student) -> CommandOutcome {
    if model.directory().has_student(student) {
        return Err(CommandError::DuplicateStudent);
    }
    model.directory_mut().add_student(student.clone())?;
    model.show_all_students();
    model.set_list_kind(ListKind::Students);
    Ok(CommandResult::mutation(format!(
        "New student added: {}",
        student.person
    )))
}

pub(crate) fn add_staff(model: &mut ModelManager, staff: &Staff) -> CommandOutcome {
    if model.directory().has_staff(staff) {
        return Err(CommandError::DuplicateStaff);
    }
    model.directory_mut().add_staff(staff.clone())?;
    model.show_all_staff();
    model.set_list_kind(ListKind::Staff);
    Ok(CommandResult::mutation(format!(
        "New staff added: {}",
        staff.person
    )))
}

pub(crate) fn add_external_party(model: &mut ModelManager, party: &ExternalParty) -> CommandOutcome {
    if model.directory().has_external_party(party) {
        return Err(CommandError::DuplicateExternalParty);
    }
    model.directory_mut().add_external_party(party.clone())?;
    model.show_all_external_parties();
    model.set_list_kind(ListKind::ExternalParties);
    Ok(CommandResult::mutation(format!(
        "New external party added: {}",
        party.person
    )))
}

pub(crate) fn delete_student(model: &mut ModelManager, index: Index) -> CommandOutcome {
    let target = model
        .filtered_students()
        .get(index.zero_based())
        .map(|student| (*student).clone())
        .ok_or(CommandError::InvalidDisplayedIndex(IndexTarget::Student))?;
    model.directory_mut().remove_student(&target)?;
    Ok(CommandResult::mutation(format!(
        "Deleted Student: {}",
        target.person
    )))
}

pub(crate) fn delete_staff(model: &mut ModelManager, index: Index) -> CommandOutcome {
    let target = model
        .filtered_staff()
        .get(index.zero_based())
        .map(|staff| (*staff).clone())
        .ok_or(CommandError::InvalidDisplayedIndex(IndexTarget::Staff))?;
    model.directory_mut().remove_staff(&target)?;
    Ok(CommandResult::mutation(format!(
        "Deleted Staff: {}",
        target.person
    )))
}

pub(crate) fn delete_external_party(model: &mut ModelManager, index: Index) -> CommandOutcome {
    let target = model
        .filtered_external_parties()
        .get(index.zero_based())
        .map(|party| (*party).clone())
        .ok_or(CommandError::InvalidDisplayedIndex(IndexTarget::ExternalParty))?;
    model.directory_mut().remove_external_party(&target)?;
    Ok(CommandResult::mutation(format!(
        "Deleted External Party: {}",
        target.person
    )))
}

pub(crate) fn list_students(model: &mut ModelManager) -> CommandResult {
    model.show_all_students();
    model.set_list_kind(ListKind::Students);
    CommandResult::message("Listed all students")
}

pub(crate) fn list_staff(model: &mut ModelManager) -> CommandResult {
    model.show_all_staff();
    model.set_list_kind(ListKind::Staff);
    CommandResult::message("Listed all staff")
}

pub(crate) fn list_external_parties(model: &mut ModelManager) -> CommandResult {
    model.show_all_external_parties();
    model.set_list_kind(ListKind::ExternalParties);
    CommandResult::message("Listed all external parties")
}

pub(crate) fn search_students(model: &mut ModelManager, query: &StudentQuery) -> CommandResult {
    let predicate = query.clone();
    model.filter_students(move |student| predicate.matches(student));
    model.set_list_kind(ListKind::Students);
    match model.filtered_students().len() {
        0 => CommandResult::message(format!(
            "Found no matching students with the attributes: {}",
            query.describe()
        )),
        count => CommandResult::message(format!(
            "Matching students found in this list: {count} students listed."
        )),
    }
}

pub(crate) fn search_staff(model: &mut ModelManager, query: &StaffQuery) -> CommandResult {
    let predicate = query.clone();
    model.filter_staff(move |staff| predicate.matches(staff));
    model.set_list_kind(ListKind::Staff);
    match model.filtered_staff().len() {
        0 => CommandResult::message(format!(
            "Found no matching staff with the attributes: {}",
            query.describe()
        )),
        count => CommandResult::message(format!(
            "Matching staff found in this list: {count} staff members listed."
        )),
    }
}

pub(crate) fn search_external_parties(
    model: &mut ModelManager,
    query: &ExternalPartyQuery,
) -> CommandResult {
    let predicate = query.clone();
    model.filter_external_parties(move |party| predicate.matches(party));
    model.set_list_kind(ListKind::ExternalParties);
    match model.filtered_external_parties().len() {
        0 => CommandResult::message(format!(
            "Found no matching external parties with the attributes: {}",
            query.describe()
        )),
        count => CommandResult::message(format!(
            "Matching external parties found in this list: {count} external parties listed."
        )),
    }
}
