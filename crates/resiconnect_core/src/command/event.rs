//! Event commands.
//!
//! Member selectors are one-based indices into the displayed student, staff
//! and external-party lists, resolved to identity references at execution.

use crate::command::{CommandError, CommandOutcome, CommandResult, IndexTarget};
use crate::index::Index;
use crate::model::event::Event;
use crate::model::fields::{EventName, EventTime};
use crate::model::manager::{ListKind, ModelManager};
use crate::model::person::{Identified, PersonRef};

pub const ADD_EVENT_WORD: &str = "addevent";
pub const DELETE_EVENT_WORD: &str = "deleteevent";
pub const LIST_EVENT_WORD: &str = "listevent";
pub const VIEW_EVENT_WORD: &str = "viewevent";
pub const SEARCH_EVENT_WORD: &str = "searchevent";
pub const ADD_EVENT_MEMBER_WORD: &str = "addeventmember";
pub const DELETE_EVENT_MEMBER_WORD: &str = "deleteeventmember";

pub const ADD_EVENT_USAGE: &str = "addevent: Adds an event to the address book. \
Parameters: name/EVENT_NAME start/YYYY-MM-DD HH:MM end/YYYY-MM-DD HH:MM \
[student/INDEX]... [staff/INDEX]... [external/INDEX]... (at least one member)\n\
Example: addevent name/Block Dinner start/2026-03-01 18:00 end/2026-03-01 21:00 student/1 staff/2";

pub const DELETE_EVENT_USAGE: &str = "deleteevent: Deletes the event identified by the index \
number used in the displayed event list.\nParameters: INDEX (must be a positive integer)\n\
Example: deleteevent 1";

pub const VIEW_EVENT_USAGE: &str = "viewevent: Shows the details and members of the event \
identified by the index number used in the displayed event list.\n\
Parameters: INDEX (must be a positive integer)\nExample: viewevent 1";

pub const SEARCH_EVENT_USAGE: &str = "searchevent: Finds events whose name contains the given \
keyword (case-insensitive).\nParameters: name/KEYWORD\nExample: searchevent name/dinner";

pub const ADD_EVENT_MEMBER_USAGE: &str = "addeventmember: Adds members to the event identified \
by the index number used in the displayed event list.\nParameters: INDEX [student/INDEX]... \
[staff/INDEX]... [external/INDEX]... (at least one member)\n\
Example: addeventmember 1 student/2 staff/1";

pub const DELETE_EVENT_MEMBER_USAGE: &str = "deleteeventmember: Removes members from the event \
identified by the index number used in the displayed event list.\nParameters: INDEX \
[student/INDEX]... [staff/INDEX]... [external/INDEX]... (at least one member)\n\
Example: deleteeventmember 1 student/2";

/// Member selectors as typed; indices refer to the displayed lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSelection {
    pub students: Vec<Index>,
    pub staff: Vec<Index>,
    pub external_parties: Vec<Index>,
}

impl MemberSelection {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.staff.is_empty() && self.external_parties.is_empty()
    }

    /// Resolves every selector to a person reference, in selector order.
    fn resolve(&self, model: &ModelManager) -> Result<Vec<PersonRef>, CommandError> {
        let mut members = Vec::new();
        let students = model.filtered_students();
        for index in &self.students {
            members.push(select(&students, *index)?);
        }
        let staff = model.filtered_staff();
        for index in &self.staff {
            members.push(select(&staff, *index)?);
        }
        let parties = model.filtered_external_parties();
        for index in &self.external_parties {
            members.push(select(&parties, *index)?);
        }
        Ok(members)
    }
}

fn select<T: Identified>(list: &[&T], index: Index) -> Result<PersonRef, CommandError> {
    list.get(index.zero_based())
        .map(|entry| entry.person().to_ref())
        .ok_or(CommandError::MemberIndexOutOfRange)
}

/// Validated `addevent` input; members resolve at execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: EventName,
    pub start: EventTime,
    pub end: EventTime,
    pub members: MemberSelection,
}

/// Case-insensitive keyword matched against event names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub keyword: String,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        event
            .name()
            .as_str()
            .to_lowercase()
            .contains(&self.keyword.to_lowercase())
    }
}

/// Position in the full event list of the displayed event at `index`.
fn locate_event(model: &ModelManager, index: Index) -> Result<usize, CommandError> {
    let displayed = model.filtered_events();
    let target = displayed
        .get(index.zero_based())
        .ok_or(CommandError::InvalidDisplayedIndex(IndexTarget::Event))?;
    model
        .directory()
        .events()
        .iter()
        .position(|event| std::ptr::eq(event, *target))
        .ok_or(CommandError::InvalidDisplayedIndex(IndexTarget::Event))
}

pub(crate) fn add_event(model: &mut ModelManager, draft: &EventDraft) -> CommandOutcome {
    let members = draft.members.resolve(model)?;
    let event = Event::new(draft.name.clone(), draft.start, draft.end, members)?;
    let feedback = format!("New event added: {event}");
    model.directory_mut().add_event(event);
    model.set_list_kind(ListKind::Events);
    Ok(CommandResult::mutation(feedback))
}

pub(crate) fn delete_event(model: &mut ModelManager, index: Index) -> CommandOutcome {
    let position = locate_event(model, index)?;
    let removed = model.directory_mut().remove_event_at(position)?;
    Ok(CommandResult::mutation(format!("Deleted Event: {removed}")))
}

pub(crate) fn list_events(model: &mut ModelManager) -> CommandResult {
    model.show_all_events();
    model.set_list_kind(ListKind::Events);
    CommandResult::message("Listed all events")
}

pub(crate) fn view_event(model: &mut ModelManager, index: Index) -> CommandOutcome {
    let position = locate_event(model, index)?;
    let directory = model.directory();
    let event = &directory.events()[position];
    let mut lines = vec![event.to_string(), "Members:".to_string()];
    for (idx, member) in event.members().iter().enumerate() {
        let line = match directory.find_contact(member) {
            Some(contact) => format!("{}. {} ({})", idx + 1, contact, contact.role_label()),
            None => format!("{}. {} (no longer in the address book)", idx + 1, member),
        };
        lines.push(line);
    }
    model.set_list_kind(ListKind::Events);
    Ok(CommandResult::message(lines.join("\n")))
}

pub(crate) fn search_events(model: &mut ModelManager, query: &EventQuery) -> CommandResult {
    let predicate = query.clone();
    model.filter_events(move |event| predicate.matches(event));
    model.set_list_kind(ListKind::Events);
    match model.filtered_events().len() {
        0 => CommandResult::message(format!(
            "Found no matching events with the attributes: name: {}",
            query.keyword
        )),
        count => CommandResult::message(format!(
            "Matching events found in this list: {count} events listed."
        )),
    }
}

pub(crate) fn add_event_members(
    model: &mut ModelManager,
    index: Index,
    selection: &MemberSelection,
) -> CommandOutcome {
    let position = locate_event(model, index)?;
    let added = selection.resolve(model)?;
    let current = &model.directory().events()[position];
    if added.iter().any(|member| current.has_member(member)) {
        return Err(CommandError::DuplicateEventMember);
    }
    let updated = current.with_members_added(added)?;
    let feedback = format!("Added member(s) to event: {updated}");
    model.directory_mut().set_event(position, updated)?;
    Ok(CommandResult::mutation(feedback))
}

pub(crate) fn delete_event_members(
    model: &mut ModelManager,
    index: Index,
    selection: &MemberSelection,
) -> CommandOutcome {
    let position = locate_event(model, index)?;
    let removed = selection.resolve(model)?;
    let current = &model.directory().events()[position];
    if removed.iter().any(|member| !current.has_member(member)) {
        return Err(CommandError::MemberNotInEvent);
    }
    let updated = current.with_members_removed(&removed)?;
    let feedback = format!("Removed member(s) from event: {updated}");
    model.directory_mut().set_event(position, updated)?;
    Ok(CommandResult::mutation(feedback))
}
