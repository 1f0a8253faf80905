//! User-visible message texts and display helpers.
//!
//! These strings are part of the front-end contract; keep them verbatim.

use crate::parser::syntax::Prefix;
use std::collections::BTreeSet;

pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_INVALID_COMMAND_FORMAT: &str = "Invalid command format! \n";
pub const MESSAGE_DUPLICATE_FIELDS: &str =
    "Multiple values specified for the following single-valued field(s): ";
pub const MESSAGE_INVALID_INDEX: &str = "Index is not a non-zero unsigned integer.";
pub const MESSAGE_INVALID_STUDENT_DISPLAYED_INDEX: &str = "The student index provided is invalid";
pub const MESSAGE_INVALID_STAFF_DISPLAYED_INDEX: &str = "The staff index provided is invalid";
pub const MESSAGE_INVALID_EXTERNAL_PARTY_DISPLAYED_INDEX: &str =
    "The external party index provided is invalid";
pub const MESSAGE_INVALID_EVENT_DISPLAYED_INDEX: &str = "The event index provided is invalid";
pub const MESSAGE_INVALID_INDEX_OUT_OF_RANGE: &str = "The specified index is out of range.";
pub const MESSAGE_INVALID_STARTTIME_AFTER_ENDTIME: &str =
    "Invalid event time: Start time must be before end time.";
pub const MESSAGE_MISSING_EVENT_MEMBER: &str = "At least one member must be specified.";

/// Builds the invalid-format message embedding a command's usage text.
pub fn invalid_format(usage: &str) -> String {
    format!("{MESSAGE_INVALID_COMMAND_FORMAT}{usage}")
}

/// Builds the duplicate-field message, naming each prefix once.
pub fn duplicate_prefixes(prefixes: &[Prefix]) -> String {
    let unique: BTreeSet<&str> = prefixes.iter().map(|prefix| prefix.as_str()).collect();
    let joined = unique.into_iter().collect::<Vec<_>>().join(" ");
    format!("{MESSAGE_DUPLICATE_FIELDS}{joined}")
}
