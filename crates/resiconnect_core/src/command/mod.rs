//! Validated commands and their execution against the model.
//!
//! # Responsibility
//! - Carry only validated values from parsing to execution.
//! - Apply one command to a `ModelManager` with all-or-nothing semantics.
//!
//! # Invariants
//! - A failed command leaves the directory unchanged.
//! - Execution performs no field validation; parsing already did.

use crate::index::Index;
use crate::messages;
use crate::model::directory::DirectorySnapshot;
use crate::model::event::EventValidationError;
use crate::model::manager::ModelManager;
use crate::model::person::{ExternalParty, Staff, Student};
use crate::model::unique_list::DirectoryError;
use crate::parser;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event;
pub mod person;

pub use event::{EventDraft, EventQuery, MemberSelection};
pub use person::{ExternalPartyQuery, StaffQuery, StudentQuery};

pub const MESSAGE_CLEAR_SUCCESS: &str = "Address book has been cleared!";
pub const MESSAGE_EXIT_ACKNOWLEDGEMENT: &str = "Exiting Address Book as requested ...";
pub const MESSAGE_SHOWING_HELP: &str = "Opened help window.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStudent(Student),
    AddStaff(Staff),
    AddExternalParty(ExternalParty),
    DeleteStudent(Index),
    DeleteStaff(Index),
    DeleteExternalParty(Index),
    ListStudents,
    ListStaff,
    ListExternalParties,
    SearchStudents(StudentQuery),
    SearchStaff(StaffQuery),
    SearchExternalParties(ExternalPartyQuery),
    AddEvent(EventDraft),
    DeleteEvent(Index),
    ListEvents,
    ViewEvent(Index),
    SearchEvents(EventQuery),
    AddEventMember {
        event: Index,
        members: MemberSelection,
    },
    DeleteEventMember {
        event: Index,
        members: MemberSelection,
    },
    Clear,
    Help,
    Exit,
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Text shown to the user.
    pub feedback: String,
    /// Front end should show usage help.
    pub show_help: bool,
    /// Front end should exit.
    pub exit: bool,
    /// Directory contents changed and should be saved.
    pub mutated: bool,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
            mutated: false,
        }
    }

    pub fn mutation(feedback: impl Into<String>) -> Self {
        Self {
            mutated: true,
            ..Self::message(feedback)
        }
    }
}

/// Displayed list an index was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Student,
    Staff,
    ExternalParty,
    Event,
}

/// Semantic failure while applying a command; the directory is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    DuplicateStudent,
    DuplicateStaff,
    DuplicateExternalParty,
    /// Index is past the end of the displayed list.
    InvalidDisplayedIndex(IndexTarget),
    /// Member selector index is past the end of its list.
    MemberIndexOutOfRange,
    /// Every selected member already belongs to the event.
    DuplicateEventMember,
    /// A selected member does not belong to the event.
    MemberNotInEvent,
    Event(EventValidationError),
    Directory(DirectoryError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStudent => write!(f, "This student already exists in the address book"),
            Self::DuplicateStaff => write!(f, "This staff already exists in the address book"),
            Self::DuplicateExternalParty => {
                write!(f, "This external party already exists in the address book")
            }
            Self::InvalidDisplayedIndex(target) => {
                let message = match target {
                    IndexTarget::Student => messages::MESSAGE_INVALID_STUDENT_DISPLAYED_INDEX,
                    IndexTarget::Staff => messages::MESSAGE_INVALID_STAFF_DISPLAYED_INDEX,
                    IndexTarget::ExternalParty => {
                        messages::MESSAGE_INVALID_EXTERNAL_PARTY_DISPLAYED_INDEX
                    }
                    IndexTarget::Event => messages::MESSAGE_INVALID_EVENT_DISPLAYED_INDEX,
                };
                write!(f, "{message}")
            }
            Self::MemberIndexOutOfRange => {
                write!(f, "{}", messages::MESSAGE_INVALID_INDEX_OUT_OF_RANGE)
            }
            Self::DuplicateEventMember => {
                write!(f, "The selected member(s) are already part of this event")
            }
            Self::MemberNotInEvent => write!(f, "The selected member(s) are not part of this event"),
            Self::Event(err) => write!(f, "{err}"),
            Self::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Event(err) => Some(err),
            Self::Directory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for CommandError {
    fn from(value: EventValidationError) -> Self {
        Self::Event(value)
    }
}

impl From<DirectoryError> for CommandError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

pub type CommandOutcome = Result<CommandResult, CommandError>;

impl Command {
    /// Short stable name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddStudent(_) => "add_student",
            Self::AddStaff(_) => "add_staff",
            Self::AddExternalParty(_) => "add_external_party",
            Self::DeleteStudent(_) => "delete_student",
            Self::DeleteStaff(_) => "delete_staff",
            Self::DeleteExternalParty(_) => "delete_external_party",
            Self::ListStudents => "list_students",
            Self::ListStaff => "list_staff",
            Self::ListExternalParties => "list_external_parties",
            Self::SearchStudents(_) => "search_students",
            Self::SearchStaff(_) => "search_staff",
            Self::SearchExternalParties(_) => "search_external_parties",
            Self::AddEvent(_) => "add_event",
            Self::DeleteEvent(_) => "delete_event",
            Self::ListEvents => "list_events",
            Self::ViewEvent(_) => "view_event",
            Self::SearchEvents(_) => "search_events",
            Self::AddEventMember { .. } => "add_event_member",
            Self::DeleteEventMember { .. } => "delete_event_member",
            Self::Clear => "clear",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Applies this command to `model`.
    pub fn execute(&self, model: &mut ModelManager) -> CommandOutcome {
        let outcome = match self {
            Self::AddStudent(student) => person::add_student(model, student),
            Self::AddStaff(staff) => person::add_staff(model, staff),
            Self::AddExternalParty(party) => person::add_external_party(model, party),
            Self::DeleteStudent(index) => person::delete_student(model, *index),
            Self::DeleteStaff(index) => person::delete_staff(model, *index),
            Self::DeleteExternalParty(index) => person::delete_external_party(model, *index),
            Self::ListStudents => Ok(person::list_students(model)),
            Self::ListStaff => Ok(person::list_staff(model)),
            Self::ListExternalParties => Ok(person::list_external_parties(model)),
            Self::SearchStudents(query) => Ok(person::search_students(model, query)),
            Self::SearchStaff(query) => Ok(person::search_staff(model, query)),
            Self::SearchExternalParties(query) => Ok(person::search_external_parties(model, query)),
            Self::AddEvent(draft) => event::add_event(model, draft),
            Self::DeleteEvent(index) => event::delete_event(model, *index),
            Self::ListEvents => Ok(event::list_events(model)),
            Self::ViewEvent(index) => event::view_event(model, *index),
            Self::SearchEvents(query) => Ok(event::search_events(model, query)),
            Self::AddEventMember { event, members } => {
                event::add_event_members(model, *event, members)
            }
            Self::DeleteEventMember { event, members } => {
                event::delete_event_members(model, *event, members)
            }
            Self::Clear => clear(model),
            Self::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::message(MESSAGE_SHOWING_HELP)
            }),
            Self::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::message(MESSAGE_EXIT_ACKNOWLEDGEMENT)
            }),
        };

        match &outcome {
            Ok(result) => info!(
                "event=command_execute module=command status=ok command={} mutated={}",
                self.kind(),
                result.mutated
            ),
            Err(err) => info!(
                "event=command_execute module=command status=error command={} error_code={}",
                self.kind(),
                error_code(err)
            ),
        }
        outcome
    }
}

fn clear(model: &mut ModelManager) -> CommandOutcome {
    model.directory_mut().reset(DirectorySnapshot::default())?;
    model.show_all();
    Ok(CommandResult::mutation(MESSAGE_CLEAR_SUCCESS))
}

fn error_code(err: &CommandError) -> &'static str {
    match err {
        CommandError::DuplicateStudent
        | CommandError::DuplicateStaff
        | CommandError::DuplicateExternalParty => "duplicate_entity",
        CommandError::InvalidDisplayedIndex(_) => "invalid_displayed_index",
        CommandError::MemberIndexOutOfRange => "member_index_out_of_range",
        CommandError::DuplicateEventMember => "duplicate_event_member",
        CommandError::MemberNotInEvent => "member_not_in_event",
        CommandError::Event(_) => "invalid_event",
        CommandError::Directory(_) => "directory_invariant",
    }
}

/// Usage text for every command, in registration order.
pub fn help_text() -> String {
    let usages = [
        person::ADD_STUDENT_USAGE,
        person::ADD_STAFF_USAGE,
        person::ADD_EXTERNAL_PARTY_USAGE,
        person::DELETE_STUDENT_USAGE,
        person::DELETE_STAFF_USAGE,
        person::DELETE_EXTERNAL_PARTY_USAGE,
        person::SEARCH_STUDENT_USAGE,
        person::SEARCH_STAFF_USAGE,
        person::SEARCH_EXTERNAL_PARTY_USAGE,
        event::ADD_EVENT_USAGE,
        event::DELETE_EVENT_USAGE,
        event::VIEW_EVENT_USAGE,
        event::SEARCH_EVENT_USAGE,
        event::ADD_EVENT_MEMBER_USAGE,
        event::DELETE_EVENT_MEMBER_USAGE,
        parser::HELP_USAGE,
    ];
    let words = parser::command_words().collect::<Vec<_>>().join(", ");
    format!("Commands: {words}\n\n{}", usages.join("\n\n"))
}
