//! Parsers for student, staff and external-party commands.
//!
//! Every parser checks, in order: duplicate single-valued prefixes,
//! mandatory prefixes, preamble, then each field in declaration order,
//! stopping at the first failure.

use crate::command::person::{
    PersonCriteria, ADD_EXTERNAL_PARTY_USAGE, ADD_STAFF_USAGE, ADD_STUDENT_USAGE,
    DELETE_EXTERNAL_PARTY_USAGE, DELETE_STAFF_USAGE, DELETE_STUDENT_USAGE,
    SEARCH_EXTERNAL_PARTY_USAGE, SEARCH_STAFF_USAGE, SEARCH_STUDENT_USAGE,
};
use crate::command::{Command, ExternalPartyQuery, StaffQuery, StudentQuery};
use crate::model::fields::{
    Address, Block, Description, Email, Level, Matric, Name, Phone, Room, StaffDesignation,
    StudentDesignation, Tag,
};
use crate::model::person::{ExternalParty, Person, Staff, Student};
use crate::parser::syntax::*;
use crate::parser::tokenizer::{tokenize, ArgMultimap};
use crate::parser::{parse_index_argument, parse_optional, ParseError, ParseResult};

const STUDENT_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_MATRIC,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_BLOCK,
    PREFIX_LEVEL,
    PREFIX_ROOM,
    PREFIX_DESIGNATION,
    PREFIX_EMERGENCY,
];
const STUDENT_MANDATORY: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_MATRIC,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_BLOCK,
    PREFIX_LEVEL,
    PREFIX_ROOM,
    PREFIX_DESIGNATION,
];

const STAFF_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DESIGNATION,
];

const EXTERNAL_PARTY_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DESCRIPTION,
];

const STUDENT_SEARCH_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_MATRIC,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_BLOCK,
    PREFIX_LEVEL,
    PREFIX_ROOM,
    PREFIX_DESIGNATION,
    PREFIX_TAG,
];
const STAFF_SEARCH_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_DESIGNATION,
    PREFIX_TAG,
];
const EXTERNAL_PARTY_SEARCH_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_DESCRIPTION,
    PREFIX_TAG,
];

/// Tokenizes with `single_valued` plus the repeatable tag prefix and runs the
/// structural checks shared by every add command.
fn tokenize_add(
    args: &str,
    single_valued: &[Prefix],
    mandatory: &[Prefix],
    usage: &'static str,
) -> ParseResult<ArgMultimap> {
    let mut prefixes = single_valued.to_vec();
    prefixes.push(PREFIX_TAG);
    let map = tokenize(args, &prefixes);
    map.verify_no_duplicate_prefixes_for(single_valued)?;
    map.require_all(mandatory, usage)?;
    map.require_empty_preamble(usage)?;
    Ok(map)
}

fn mandatory<'a>(map: &'a ArgMultimap, prefix: Prefix) -> &'a str {
    map.value(prefix).unwrap_or_default()
}

fn parse_tags(map: &ArgMultimap) -> ParseResult<Vec<Tag>> {
    map.all_values(PREFIX_TAG)
        .iter()
        .map(|raw| Tag::parse(raw).map_err(ParseError::from))
        .collect()
}

/// Parses the contact fields every role shares, in declaration order.
fn parse_contact(map: &ArgMultimap) -> ParseResult<(Phone, Email, Address)> {
    let phone = Phone::parse(mandatory(map, PREFIX_PHONE))?;
    let email = Email::parse(mandatory(map, PREFIX_EMAIL))?;
    let address = Address::parse(mandatory(map, PREFIX_ADDRESS))?;
    Ok((phone, email, address))
}

pub fn parse_add_student(args: &str) -> ParseResult<Command> {
    let map = tokenize_add(args, STUDENT_PREFIXES, STUDENT_MANDATORY, ADD_STUDENT_USAGE)?;

    let name = Name::parse(mandatory(&map, PREFIX_NAME))?;
    let matric = Matric::parse(mandatory(&map, PREFIX_MATRIC))?;
    let (phone, email, address) = parse_contact(&map)?;
    let block = Block::parse(mandatory(&map, PREFIX_BLOCK))?;
    let level = Level::parse(mandatory(&map, PREFIX_LEVEL))?;
    let room = Room::parse(mandatory(&map, PREFIX_ROOM))?;
    let designation = StudentDesignation::parse(mandatory(&map, PREFIX_DESIGNATION))?;
    let emergency = parse_optional(map.value(PREFIX_EMERGENCY), Phone::parse)?;
    let tags = parse_tags(&map)?;

    Ok(Command::AddStudent(Student {
        person: Person::new(name, phone, email, address, tags),
        matric,
        emergency,
        block,
        level,
        room,
        designation,
    }))
}

pub fn parse_add_staff(args: &str) -> ParseResult<Command> {
    let map = tokenize_add(args, STAFF_PREFIXES, STAFF_PREFIXES, ADD_STAFF_USAGE)?;

    let name = Name::parse(mandatory(&map, PREFIX_NAME))?;
    let (phone, email, address) = parse_contact(&map)?;
    let designation = StaffDesignation::parse(mandatory(&map, PREFIX_DESIGNATION))?;
    let tags = parse_tags(&map)?;

    Ok(Command::AddStaff(Staff {
        person: Person::new(name, phone, email, address, tags),
        designation,
    }))
}

pub fn parse_add_external_party(args: &str) -> ParseResult<Command> {
    let map = tokenize_add(
        args,
        EXTERNAL_PARTY_PREFIXES,
        EXTERNAL_PARTY_PREFIXES,
        ADD_EXTERNAL_PARTY_USAGE,
    )?;

    let name = Name::parse(mandatory(&map, PREFIX_NAME))?;
    let (phone, email, address) = parse_contact(&map)?;
    let description = Description::parse(mandatory(&map, PREFIX_DESCRIPTION))?;
    let tags = parse_tags(&map)?;

    Ok(Command::AddExternalParty(ExternalParty {
        person: Person::new(name, phone, email, address, tags),
        description,
    }))
}

pub fn parse_delete_student(args: &str) -> ParseResult<Command> {
    parse_index_argument(args, DELETE_STUDENT_USAGE).map(Command::DeleteStudent)
}

pub fn parse_delete_staff(args: &str) -> ParseResult<Command> {
    parse_index_argument(args, DELETE_STAFF_USAGE).map(Command::DeleteStaff)
}

pub fn parse_delete_external_party(args: &str) -> ParseResult<Command> {
    parse_index_argument(args, DELETE_EXTERNAL_PARTY_USAGE).map(Command::DeleteExternalParty)
}

/// Tokenizes a search; every prefix is single-valued and at least one must
/// be present.
fn tokenize_search(
    args: &str,
    prefixes: &[Prefix],
    usage: &'static str,
) -> ParseResult<ArgMultimap> {
    let map = tokenize(args, prefixes);
    map.verify_no_duplicate_prefixes_for(prefixes)?;
    map.require_empty_preamble(usage)?;
    if !prefixes.iter().any(|prefix| map.contains(*prefix)) {
        return Err(ParseError::InvalidFormat(usage));
    }
    Ok(map)
}

/// Returns the keyword for `prefix`; a present-but-blank keyword is malformed.
fn keyword(map: &ArgMultimap, prefix: Prefix, usage: &'static str) -> ParseResult<Option<String>> {
    match map.value(prefix) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ParseError::InvalidFormat(usage)),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

fn parse_person_criteria(map: &ArgMultimap, usage: &'static str) -> ParseResult<PersonCriteria> {
    Ok(PersonCriteria {
        name: keyword(map, PREFIX_NAME, usage)?,
        phone: keyword(map, PREFIX_PHONE, usage)?,
        email: keyword(map, PREFIX_EMAIL, usage)?,
        tag: parse_optional(map.value(PREFIX_TAG), Tag::parse)?,
    })
}

pub fn parse_search_student(args: &str) -> ParseResult<Command> {
    let usage = SEARCH_STUDENT_USAGE;
    let map = tokenize_search(args, STUDENT_SEARCH_PREFIXES, usage)?;
    Ok(Command::SearchStudents(StudentQuery {
        person: parse_person_criteria(&map, usage)?,
        matric: keyword(&map, PREFIX_MATRIC, usage)?,
        block: keyword(&map, PREFIX_BLOCK, usage)?,
        level: keyword(&map, PREFIX_LEVEL, usage)?,
        room: keyword(&map, PREFIX_ROOM, usage)?,
        designation: parse_optional(map.value(PREFIX_DESIGNATION), StudentDesignation::parse)?,
    }))
}

pub fn parse_search_staff(args: &str) -> ParseResult<Command> {
    let usage = SEARCH_STAFF_USAGE;
    let map = tokenize_search(args, STAFF_SEARCH_PREFIXES, usage)?;
    Ok(Command::SearchStaff(StaffQuery {
        person: parse_person_criteria(&map, usage)?,
        designation: parse_optional(map.value(PREFIX_DESIGNATION), StaffDesignation::parse)?,
    }))
}

pub fn parse_search_external_party(args: &str) -> ParseResult<Command> {
    let usage = SEARCH_EXTERNAL_PARTY_USAGE;
    let map = tokenize_search(args, EXTERNAL_PARTY_SEARCH_PREFIXES, usage)?;
    Ok(Command::SearchExternalParties(ExternalPartyQuery {
        person: parse_person_criteria(&map, usage)?,
        description: keyword(&map, PREFIX_DESCRIPTION, usage)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_staff_requires_designation() {
        let err = parse_add_staff(" name/Mary phone/91234567 email/m@u.edu a/Office").unwrap_err();
        assert_eq!(err, ParseError::InvalidFormat(ADD_STAFF_USAGE));
    }

    #[test]
    fn add_staff_rejects_preamble() {
        let err = parse_add_staff(
            " oops name/Mary phone/91234567 email/m@u.edu a/Office designation/1",
        )
        .unwrap_err();
        assert_eq!(err, ParseError::InvalidFormat(ADD_STAFF_USAGE));
    }

    #[test]
    fn add_staff_rejects_out_of_range_designation() {
        let err = parse_add_staff(
            " name/Mary phone/91234567 email/m@u.edu a/Office designation/3",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), StaffDesignation::MESSAGE_CONSTRAINTS);
    }

    #[test]
    fn add_external_party_collects_repeated_tags() {
        let command = parse_add_external_party(
            " name/Ah Kow phone/67771234 email/sales@ahkow.com a/5 Clementi Road desc/Caterer t/food t/vendor",
        )
        .unwrap();
        let Command::AddExternalParty(party) = command else {
            panic!("expected external party command");
        };
        let tags: Vec<_> = party.person.tags().iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["food", "vendor"]);
        assert_eq!(party.description.as_str(), "Caterer");
    }

    #[test]
    fn search_requires_at_least_one_attribute() {
        assert_eq!(
            parse_search_student("  ").unwrap_err(),
            ParseError::InvalidFormat(SEARCH_STUDENT_USAGE)
        );
        assert_eq!(
            parse_search_staff(" name/").unwrap_err(),
            ParseError::InvalidFormat(SEARCH_STAFF_USAGE)
        );
    }

    #[test]
    fn search_student_collects_criteria() {
        let command = parse_search_student(" name/john block/A designation/1").unwrap();
        let Command::SearchStudents(query) = command else {
            panic!("expected search command");
        };
        assert_eq!(query.person.name.as_deref(), Some("john"));
        assert_eq!(query.block.as_deref(), Some("A"));
        assert_eq!(query.designation, Some(StudentDesignation::FloorHead));
        assert_eq!(query.describe(), "name: john, block: A, designation: Floor Head");
    }

    #[test]
    fn delete_rejects_non_positive_index() {
        assert_eq!(
            parse_delete_student(" 0").unwrap_err(),
            ParseError::InvalidFormat(DELETE_STUDENT_USAGE)
        );
        assert_eq!(
            parse_delete_staff(" abc").unwrap_err(),
            ParseError::InvalidFormat(DELETE_STAFF_USAGE)
        );
        assert!(parse_delete_external_party(" 2").is_ok());
    }
}
