//! Scheduled residence event.
//!
//! # Invariants
//! - `start` is strictly before `end`.
//! - `members` is non-empty and holds no two references to the same person.
//! - Members are weak references; removing a person leaves them in place.

use crate::messages::{MESSAGE_INVALID_STARTTIME_AFTER_ENDTIME, MESSAGE_MISSING_EVENT_MEMBER};
use crate::model::fields::{EventName, EventTime};
use crate::model::person::PersonRef;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Event construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// `start` is not strictly before `end`.
    InvalidWindow,
    /// No members were supplied.
    NoMembers,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow => f.write_str(MESSAGE_INVALID_STARTTIME_AFTER_ENDTIME),
            Self::NoMembers => f.write_str(MESSAGE_MISSING_EVENT_MEMBER),
        }
    }
}

impl Error for EventValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: EventName,
    start: EventTime,
    end: EventTime,
    members: Vec<PersonRef>,
}

impl Event {
    /// Builds an event, collapsing repeated member references.
    pub fn new(
        name: EventName,
        start: EventTime,
        end: EventTime,
        members: impl IntoIterator<Item = PersonRef>,
    ) -> Result<Self, EventValidationError> {
        if start >= end {
            return Err(EventValidationError::InvalidWindow);
        }
        let mut unique: Vec<PersonRef> = Vec::new();
        for member in members {
            if !unique.iter().any(|existing| existing.refers_to(&member)) {
                unique.push(member);
            }
        }
        if unique.is_empty() {
            return Err(EventValidationError::NoMembers);
        }
        Ok(Self {
            name,
            start,
            end,
            members: unique,
        })
    }

    pub fn name(&self) -> &EventName {
        &self.name
    }

    pub fn start(&self) -> EventTime {
        self.start
    }

    pub fn end(&self) -> EventTime {
        self.end
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[PersonRef] {
        &self.members
    }

    pub fn has_member(&self, member: &PersonRef) -> bool {
        self.members.iter().any(|existing| existing.refers_to(member))
    }

    /// Returns a copy with `added` appended after the current members.
    pub fn with_members_added(
        &self,
        added: impl IntoIterator<Item = PersonRef>,
    ) -> Result<Self, EventValidationError> {
        let members = self.members.iter().cloned().chain(added);
        Self::new(self.name.clone(), self.start, self.end, members)
    }

    /// Returns a copy without any member matching `removed`.
    pub fn with_members_removed(&self, removed: &[PersonRef]) -> Result<Self, EventValidationError> {
        let members = self
            .members
            .iter()
            .filter(|member| !removed.iter().any(|target| target.refers_to(member)))
            .cloned()
            .collect::<Vec<_>>();
        Self::new(self.name.clone(), self.start, self.end, members)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Event Name: {}; Start Time: {}; End Time: {}",
            self.name, self.start, self.end
        )
    }
}
