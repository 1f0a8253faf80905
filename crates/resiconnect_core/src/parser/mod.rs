//! Command-line interpretation.
//!
//! # Responsibility
//! - Split an input line into command word and argument string.
//! - Route the arguments to the parser registered for that word.
//! - Return a fully validated `Command`, or a `ParseError` before any state
//!   is touched.
//!
//! # Invariants
//! - Lookup is exact-match on the command word; no prefix or fuzzy matching.
//! - Dispatch never executes a command.

use crate::command::{event as event_cmd, person as person_cmd, Command};
use crate::index::Index;
use crate::messages;
use crate::model::event::EventValidationError;
use crate::model::fields::FieldError;
use crate::parser::syntax::Prefix;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event;
pub mod person;
pub mod syntax;
pub mod tokenizer;

/// Input rejected before execution. Safe to retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Command word has no registered parser.
    UnknownCommand,
    /// Arguments are malformed; carries the command's usage text.
    InvalidFormat(&'static str),
    /// Single-valued prefixes supplied more than once.
    DuplicatePrefixes(Vec<Prefix>),
    /// A value failed its field's validity predicate.
    InvalidField(FieldError),
    /// Index is not a positive integer.
    InvalidIndex,
    /// Event start is not strictly before its end.
    InvalidEventTime,
    /// Event command named no member.
    MissingEventMember,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "{}", messages::MESSAGE_UNKNOWN_COMMAND),
            Self::InvalidFormat(usage) => write!(f, "{}", messages::invalid_format(usage)),
            Self::DuplicatePrefixes(prefixes) => {
                write!(f, "{}", messages::duplicate_prefixes(prefixes))
            }
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::InvalidIndex => write!(f, "{}", messages::MESSAGE_INVALID_INDEX),
            Self::InvalidEventTime => {
                write!(f, "{}", messages::MESSAGE_INVALID_STARTTIME_AFTER_ENDTIME)
            }
            Self::MissingEventMember => write!(f, "{}", messages::MESSAGE_MISSING_EVENT_MEMBER),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<EventValidationError> for ParseError {
    fn from(value: EventValidationError) -> Self {
        match value {
            EventValidationError::InvalidWindow => Self::InvalidEventTime,
            EventValidationError::NoMembers => Self::MissingEventMember,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

type ParserFn = fn(&str) -> ParseResult<Command>;

/// Registered command words, in help order.
const COMMAND_TABLE: &[(&str, ParserFn)] = &[
    (person_cmd::ADD_STUDENT_WORD, person::parse_add_student),
    (person_cmd::ADD_STAFF_WORD, person::parse_add_staff),
    (person_cmd::ADD_EXTERNAL_PARTY_WORD, person::parse_add_external_party),
    (person_cmd::DELETE_STUDENT_WORD, person::parse_delete_student),
    (person_cmd::DELETE_STAFF_WORD, person::parse_delete_staff),
    (person_cmd::DELETE_EXTERNAL_PARTY_WORD, person::parse_delete_external_party),
    (person_cmd::LIST_STUDENT_WORD, parse_list_students),
    (person_cmd::LIST_STAFF_WORD, parse_list_staff),
    (person_cmd::LIST_EXTERNAL_PARTY_WORD, parse_list_external_parties),
    (person_cmd::SEARCH_STUDENT_WORD, person::parse_search_student),
    (person_cmd::SEARCH_STAFF_WORD, person::parse_search_staff),
    (person_cmd::SEARCH_EXTERNAL_PARTY_WORD, person::parse_search_external_party),
    (event_cmd::ADD_EVENT_WORD, event::parse_add_event),
    (event_cmd::DELETE_EVENT_WORD, event::parse_delete_event),
    (event_cmd::LIST_EVENT_WORD, parse_list_events),
    (event_cmd::VIEW_EVENT_WORD, event::parse_view_event),
    (event_cmd::SEARCH_EVENT_WORD, event::parse_search_event),
    (event_cmd::ADD_EVENT_MEMBER_WORD, event::parse_add_event_member),
    (event_cmd::DELETE_EVENT_MEMBER_WORD, event::parse_delete_event_member),
    (CLEAR_WORD, parse_clear),
    (HELP_WORD, parse_help),
    (EXIT_WORD, parse_exit),
];

// Words taking no arguments ignore anything after them.
fn parse_list_students(_: &str) -> ParseResult<Command> {
    Ok(Command::ListStudents)
}

fn parse_list_staff(_: &str) -> ParseResult<Command> {
    Ok(Command::ListStaff)
}

fn parse_list_external_parties(_: &str) -> ParseResult<Command> {
    Ok(Command::ListExternalParties)
}

fn parse_list_events(_: &str) -> ParseResult<Command> {
    Ok(Command::ListEvents)
}

fn parse_clear(_: &str) -> ParseResult<Command> {
    Ok(Command::Clear)
}

fn parse_help(_: &str) -> ParseResult<Command> {
    Ok(Command::Help)
}

fn parse_exit(_: &str) -> ParseResult<Command> {
    Ok(Command::Exit)
}

pub const CLEAR_WORD: &str = "clear";
pub const HELP_WORD: &str = "help";
pub const EXIT_WORD: &str = "exit";

pub const HELP_USAGE: &str = "help: Shows program usage instructions.\nExample: help";

/// Returns every registered command word in help order.
pub fn command_words() -> impl Iterator<Item = &'static str> {
    COMMAND_TABLE.iter().map(|(word, _)| *word)
}

/// Parses one input line into a validated command.
///
/// The first whitespace-delimited token selects the parser; the remainder,
/// leading whitespace included, is passed to it verbatim.
pub fn parse_command(input: &str) -> ParseResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat(HELP_USAGE));
    }

    let split_at = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (word, arguments) = trimmed.split_at(split_at);

    let entry = COMMAND_TABLE.iter().find(|(candidate, _)| *candidate == word);
    let Some((word, parser)) = entry else {
        debug!("event=command_parse module=parser status=error error_code=unknown_command");
        return Err(ParseError::UnknownCommand);
    };
    debug!(
        "event=command_parse module=parser status=start command_word={} args_len={}",
        word,
        arguments.len()
    );

    let result = parser(arguments);
    if let Err(err) = &result {
        debug!(
            "event=command_parse module=parser status=error command_word={} error_code={}",
            word,
            error_code(err)
        );
    }
    result
}

fn error_code(err: &ParseError) -> &'static str {
    match err {
        ParseError::UnknownCommand => "unknown_command",
        ParseError::InvalidFormat(_) => "invalid_format",
        ParseError::DuplicatePrefixes(_) => "duplicate_prefix",
        ParseError::InvalidField(field) => field.field,
        ParseError::InvalidIndex => "invalid_index",
        ParseError::InvalidEventTime => "invalid_event_time",
        ParseError::MissingEventMember => "missing_event_member",
    }
}

/// Parses a lone index argument, mapping any failure to the usage text.
pub(crate) fn parse_index_argument(args: &str, usage: &'static str) -> ParseResult<Index> {
    Index::parse(args).ok_or(ParseError::InvalidFormat(usage))
}

/// Parses an optional value with `parse`, passing `None` through.
pub(crate) fn parse_optional<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, FieldError>,
) -> ParseResult<Option<T>> {
    raw.map(parse).transpose().map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_word_is_rejected_before_parsing() {
        assert_eq!(parse_command("frobnicate name/x"), Err(ParseError::UnknownCommand));
        assert_eq!(
            parse_command("frobnicate").unwrap_err().to_string(),
            "Unknown command"
        );
    }

    #[test]
    fn lookup_is_exact_match() {
        assert_eq!(parse_command("lis"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_command("LISTSTUDENT"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_command("liststudent"), Ok(Command::ListStudents));
    }

    #[test]
    fn blank_input_shows_help_usage() {
        let err = parse_command("   ").unwrap_err();
        assert_eq!(err, ParseError::InvalidFormat(HELP_USAGE));
        assert!(err.to_string().starts_with("Invalid command format! \n"));
    }

    #[test]
    fn simple_words_ignore_trailing_arguments() {
        assert_eq!(parse_command("exit now"), Ok(Command::Exit));
        assert_eq!(parse_command("  clear  "), Ok(Command::Clear));
        assert_eq!(parse_command("help"), Ok(Command::Help));
    }

    #[test]
    fn command_words_are_unique() {
        let words: Vec<_> = command_words().collect();
        let unique: std::collections::BTreeSet<_> = words.iter().collect();
        assert_eq!(words.len(), unique.len());
    }
}
