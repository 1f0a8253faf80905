//! Parsers for event commands.

use crate::command::event::{
    ADD_EVENT_MEMBER_USAGE, ADD_EVENT_USAGE, DELETE_EVENT_MEMBER_USAGE, DELETE_EVENT_USAGE,
    SEARCH_EVENT_USAGE, VIEW_EVENT_USAGE,
};
use crate::command::{Command, EventDraft, EventQuery, MemberSelection};
use crate::index::Index;
use crate::model::fields::{EventName, EventTime};
use crate::parser::syntax::{
    Prefix, PREFIX_END, PREFIX_MEMBER_EXTERNAL, PREFIX_MEMBER_STAFF, PREFIX_MEMBER_STUDENT,
    PREFIX_NAME, PREFIX_START,
};
use crate::parser::tokenizer::{tokenize, ArgMultimap};
use crate::parser::{parse_index_argument, ParseError, ParseResult};

const MEMBER_PREFIXES: &[Prefix] = &[
    PREFIX_MEMBER_STUDENT,
    PREFIX_MEMBER_STAFF,
    PREFIX_MEMBER_EXTERNAL,
];
const EVENT_FIELDS: &[Prefix] = &[PREFIX_NAME, PREFIX_START, PREFIX_END];

fn parse_member_indices(map: &ArgMultimap, prefix: Prefix) -> ParseResult<Vec<Index>> {
    map.all_values(prefix)
        .iter()
        .map(|raw| Index::parse(raw).ok_or(ParseError::InvalidIndex))
        .collect()
}

/// Reads member selectors; an empty selection is rejected.
fn parse_members(map: &ArgMultimap) -> ParseResult<MemberSelection> {
    let selection = MemberSelection {
        students: parse_member_indices(map, PREFIX_MEMBER_STUDENT)?,
        staff: parse_member_indices(map, PREFIX_MEMBER_STAFF)?,
        external_parties: parse_member_indices(map, PREFIX_MEMBER_EXTERNAL)?,
    };
    if selection.is_empty() {
        return Err(ParseError::MissingEventMember);
    }
    Ok(selection)
}

pub fn parse_add_event(args: &str) -> ParseResult<Command> {
    let prefixes = [EVENT_FIELDS, MEMBER_PREFIXES].concat();
    let map = tokenize(args, &prefixes);
    map.verify_no_duplicate_prefixes_for(EVENT_FIELDS)?;
    map.require_all(EVENT_FIELDS, ADD_EVENT_USAGE)?;
    map.require_empty_preamble(ADD_EVENT_USAGE)?;

    let name = EventName::parse(map.value(PREFIX_NAME).unwrap_or_default())?;
    let start = EventTime::parse(map.value(PREFIX_START).unwrap_or_default())?;
    let end = EventTime::parse(map.value(PREFIX_END).unwrap_or_default())?;
    if start >= end {
        return Err(ParseError::InvalidEventTime);
    }
    let members = parse_members(&map)?;

    Ok(Command::AddEvent(EventDraft {
        name,
        start,
        end,
        members,
    }))
}

pub fn parse_delete_event(args: &str) -> ParseResult<Command> {
    parse_index_argument(args, DELETE_EVENT_USAGE).map(Command::DeleteEvent)
}

pub fn parse_view_event(args: &str) -> ParseResult<Command> {
    parse_index_argument(args, VIEW_EVENT_USAGE).map(Command::ViewEvent)
}

pub fn parse_search_event(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NAME]);
    map.verify_no_duplicate_prefixes_for(&[PREFIX_NAME])?;
    map.require_all(&[PREFIX_NAME], SEARCH_EVENT_USAGE)?;
    map.require_empty_preamble(SEARCH_EVENT_USAGE)?;
    let keyword = map.value(PREFIX_NAME).unwrap_or_default().trim().to_string();
    Ok(Command::SearchEvents(EventQuery { keyword }))
}

/// Splits `INDEX selectors...` shared by the member-editing commands.
fn parse_member_edit(args: &str, usage: &'static str) -> ParseResult<(Index, MemberSelection)> {
    let map = tokenize(args, MEMBER_PREFIXES);
    let event = parse_index_argument(map.preamble(), usage)?;
    let members = parse_members(&map)?;
    Ok((event, members))
}

pub fn parse_add_event_member(args: &str) -> ParseResult<Command> {
    let (event, members) = parse_member_edit(args, ADD_EVENT_MEMBER_USAGE)?;
    Ok(Command::AddEventMember { event, members })
}

pub fn parse_delete_event_member(args: &str) -> ParseResult<Command> {
    let (event, members) = parse_member_edit(args, DELETE_EVENT_MEMBER_USAGE)?;
    Ok(Command::DeleteEventMember { event, members })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_event_collects_members_by_kind() {
        let command = parse_add_event(
            " name/Block Dinner start/2026-03-01 18:00 end/2026-03-01 21:00 student/1 staff/2 student/3",
        )
        .unwrap();
        let Command::AddEvent(draft) = command else {
            panic!("expected add event command");
        };
        assert_eq!(draft.name.as_str(), "Block Dinner");
        assert_eq!(draft.start.to_string(), "2026-03-01 18:00");
        assert_eq!(
            draft.members.students,
            vec![Index::from_one_based(1).unwrap(), Index::from_one_based(3).unwrap()]
        );
        assert_eq!(draft.members.staff, vec![Index::from_one_based(2).unwrap()]);
        assert!(draft.members.external_parties.is_empty());
    }

    #[test]
    fn add_event_rejects_reversed_window() {
        let err = parse_add_event(
            " name/Dinner start/2026-03-01 21:00 end/2026-03-01 18:00 student/1",
        )
        .unwrap_err();
        assert_eq!(err, ParseError::InvalidEventTime);
        assert_eq!(
            err.to_string(),
            "Invalid event time: Start time must be before end time."
        );
    }

    #[test]
    fn add_event_requires_a_member() {
        let err =
            parse_add_event(" name/Dinner start/2026-03-01 18:00 end/2026-03-01 21:00").unwrap_err();
        assert_eq!(err, ParseError::MissingEventMember);
    }

    #[test]
    fn add_event_rejects_bad_member_index() {
        let err = parse_add_event(
            " name/Dinner start/2026-03-01 18:00 end/2026-03-01 21:00 staff/0",
        )
        .unwrap_err();
        assert_eq!(err, ParseError::InvalidIndex);
    }

    #[test]
    fn member_edit_reads_event_index_from_preamble() {
        let command = parse_add_event_member(" 2 external/1").unwrap();
        assert_eq!(
            command,
            Command::AddEventMember {
                event: Index::from_one_based(2).unwrap(),
                members: MemberSelection {
                    external_parties: vec![Index::from_one_based(1).unwrap()],
                    ..MemberSelection::default()
                },
            }
        );
        assert_eq!(
            parse_delete_event_member(" student/1").unwrap_err(),
            ParseError::InvalidFormat(DELETE_EVENT_MEMBER_USAGE)
        );
    }

    #[test]
    fn search_event_needs_keyword() {
        assert_eq!(
            parse_search_event(" ").unwrap_err(),
            ParseError::InvalidFormat(SEARCH_EVENT_USAGE)
        );
        assert_eq!(
            parse_search_event(" name/dinner").unwrap(),
            Command::SearchEvents(EventQuery {
                keyword: "dinner".to_string()
            })
        );
    }
}
