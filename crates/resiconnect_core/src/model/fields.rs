//! Self-validating scalar fields shared by every directory entity.
//!
//! # Responsibility
//! - Own the single validity predicate for each field kind.
//! - Guarantee that a constructed value always satisfies its predicate.
//!
//! # Invariants
//! - Command parsing and persisted-record loading call the same `parse`
//!   constructors, so both paths enforce identical rules.
//! - Raw input is trimmed before validation; the trimmed text is stored.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Textual layout of event start/end times.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,15}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9+_.\-]*[A-Za-z0-9])?@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?$",
    )
    .expect("valid email regex")
});
static MATRIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^A[0-9]{7}[A-Z]$").expect("valid matric regex"));
static BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]$").expect("valid block regex"));
static LEVEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]?$").expect("valid level regex"));
static ROOM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").expect("valid room regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));
static DESIGNATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-2]$").expect("valid designation regex"));

/// A raw value failed its field's validity predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field kind, e.g. `Phone`.
    pub field: &'static str,
    /// User-facing constraint message for that field kind.
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for FieldError {}

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident, $message:expr, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub const MESSAGE_CONSTRAINTS: &'static str = $message;

            /// Validates and wraps `raw` after trimming.
            pub fn parse(raw: &str) -> Result<Self, FieldError> {
                let trimmed = raw.trim();
                if !Self::is_valid(trimmed) {
                    return Err(FieldError {
                        field: stringify!($name),
                        message: Self::MESSAGE_CONSTRAINTS,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns whether `value` satisfies this field's predicate.
            pub fn is_valid(value: &str) -> bool {
                let check: fn(&str) -> bool = $check;
                check(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

text_field!(
    /// Person name; identity comparison ignores case.
    Name,
    "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    |value| NAME_RE.is_match(value)
);

text_field!(
    Phone,
    "Phone numbers should only contain numbers, and it should be between 3 and 15 digits long",
    |value| PHONE_RE.is_match(value)
);

text_field!(
    Email,
    "Emails should be of the format local-part@domain, where both parts start and end with \
     alphanumeric characters and the domain ends with a label at least 2 characters long",
    |value| {
        let Some((_, domain)) = value.rsplit_once('@') else {
            return false;
        };
        EMAIL_RE.is_match(value)
            && domain.rsplit('.').next().is_some_and(|label| label.len() >= 2)
    }
);

text_field!(
    Address,
    "Addresses can take any values, and it should not be blank",
    |value| value.chars().next().is_some_and(|c| !c.is_whitespace())
);

text_field!(
    /// University matriculation number, e.g. `A1234567B`.
    Matric,
    "Matric numbers should start with 'A', followed by 7 digits and end with an uppercase letter",
    |value| MATRIC_RE.is_match(value)
);

text_field!(
    Block,
    "Blocks should be a single uppercase letter",
    |value| BLOCK_RE.is_match(value)
);

text_field!(
    Level,
    "Levels should be an integer from 1 to 99",
    |value| LEVEL_RE.is_match(value)
);

text_field!(
    /// Room number within a level. Leading zeros are significant.
    Room,
    "Rooms should be a number of 1 to 3 digits",
    |value| ROOM_RE.is_match(value)
);

text_field!(
    Description,
    "Descriptions can take any values, and it should not be blank",
    |value| !value.is_empty()
);

text_field!(
    /// Short label attached to a person; compared by label equality.
    Tag,
    "Tags names should be alphanumeric",
    |value| TAG_RE.is_match(value)
);

text_field!(
    EventName,
    "Event names should only contain alphanumeric characters and spaces, and it should not be blank",
    |value| NAME_RE.is_match(value)
);

impl Name {
    /// Case-insensitive comparison used by person identity.
    pub fn matches_ignore_case(&self, other: &Name) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

/// Role of a staff member. The ordinal table is fixed and explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StaffDesignation {
    SupportStaff,
    BlockInCharge,
    ResidenceMaster,
}

/// Role of a resident student. The ordinal table is fixed and explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StudentDesignation {
    Resident,
    FloorHead,
    BlockHead,
}

const DESIGNATION_CONSTRAINTS: &str =
    "Designation should only be an integer from 0 to 2, and it should not be blank";

impl StaffDesignation {
    pub const MESSAGE_CONSTRAINTS: &'static str = DESIGNATION_CONSTRAINTS;

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        parse_ordinal(raw.trim())
            .and_then(Self::from_ordinal)
            .ok_or(FieldError {
                field: "StaffDesignation",
                message: Self::MESSAGE_CONSTRAINTS,
            })
    }

    pub fn is_valid(value: &str) -> bool {
        DESIGNATION_RE.is_match(value)
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::SupportStaff),
            1 => Some(Self::BlockInCharge),
            2 => Some(Self::ResidenceMaster),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Self::SupportStaff => 0,
            Self::BlockInCharge => 1,
            Self::ResidenceMaster => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SupportStaff => "Support Staff",
            Self::BlockInCharge => "Block IC",
            Self::ResidenceMaster => "Residence Master",
        }
    }
}

impl StudentDesignation {
    pub const MESSAGE_CONSTRAINTS: &'static str = DESIGNATION_CONSTRAINTS;

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        parse_ordinal(raw.trim())
            .and_then(Self::from_ordinal)
            .ok_or(FieldError {
                field: "StudentDesignation",
                message: Self::MESSAGE_CONSTRAINTS,
            })
    }

    pub fn is_valid(value: &str) -> bool {
        DESIGNATION_RE.is_match(value)
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Resident),
            1 => Some(Self::FloorHead),
            2 => Some(Self::BlockHead),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Self::Resident => 0,
            Self::FloorHead => 1,
            Self::BlockHead => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Resident => "Resident",
            Self::FloorHead => "Floor Head",
            Self::BlockHead => "Block Head",
        }
    }
}

fn parse_ordinal(value: &str) -> Option<u8> {
    if !DESIGNATION_RE.is_match(value) {
        return None;
    }
    value.parse().ok()
}

impl Display for StaffDesignation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Display for StudentDesignation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Minute-resolution wall-clock time of an event boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTime(NaiveDateTime);

impl EventTime {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Event times should be a valid date and time in the format YYYY-MM-DD HH:MM";

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        NaiveDateTime::parse_from_str(raw.trim(), EVENT_TIME_FORMAT)
            .map(Self)
            .map_err(|_| FieldError {
                field: "EventTime",
                message: Self::MESSAGE_CONSTRAINTS,
            })
    }

    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for EventTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(EVENT_TIME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_digits_within_bounds() {
        assert!(Phone::is_valid("98765432"));
        assert!(Phone::is_valid("911"));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("9876 5432"));
        assert!(!Phone::is_valid("1234567890123456"));
        assert!(!Phone::is_valid("phone"));
    }

    #[test]
    fn email_accepts_common_shapes_and_rejects_malformed() {
        assert!(Email::is_valid("john@u.edu"));
        assert!(Email::is_valid("a.b+c@mail.example.com"));
        assert!(!Email::is_valid("john@u"));
        assert!(!Email::is_valid("john@u.e"));
        assert!(!Email::is_valid("@u.edu"));
        assert!(!Email::is_valid("john.@u.edu"));
        assert!(!Email::is_valid("john u@u.edu"));
        assert!(!Email::is_valid("john.x@u"));
        assert!(Email::is_valid("z@localhost"));
    }

    #[test]
    fn matric_follows_fixed_pattern() {
        assert!(Matric::is_valid("A1234567B"));
        assert!(!Matric::is_valid("a1234567b"));
        assert!(!Matric::is_valid("A123456B"));
        assert!(!Matric::is_valid("B1234567C"));
    }

    #[test]
    fn parse_trims_and_keeps_room_leading_zero() {
        let room = Room::parse(" 01 ").unwrap();
        assert_eq!(room.as_str(), "01");
        assert!(Level::parse("0").is_err());
        assert!(Level::parse("12").is_ok());
    }

    #[test]
    fn blank_values_are_rejected() {
        assert_eq!(
            Name::parse("   ").unwrap_err().message,
            Name::MESSAGE_CONSTRAINTS
        );
        assert!(Address::parse("").is_err());
        assert!(Description::parse("  ").is_err());
    }

    #[test]
    fn designation_ordinal_table_is_bidirectional() {
        for ordinal in 0..=2u8 {
            let staff = StaffDesignation::from_ordinal(ordinal).unwrap();
            assert_eq!(staff.ordinal(), ordinal);
            let student = StudentDesignation::from_ordinal(ordinal).unwrap();
            assert_eq!(student.ordinal(), ordinal);
        }
        assert_eq!(StaffDesignation::from_ordinal(3), None);
        assert_eq!(
            StaffDesignation::parse("2").unwrap(),
            StaffDesignation::ResidenceMaster
        );
        assert!(StaffDesignation::parse("3").is_err());
        assert!(StudentDesignation::parse("01").is_err());
        assert!(StudentDesignation::parse("-1").is_err());
    }

    #[test]
    fn event_time_rejects_impossible_dates() {
        let time = EventTime::parse("2026-03-01 14:30").unwrap();
        assert_eq!(time.to_string(), "2026-03-01 14:30");
        assert!(EventTime::parse("2026-02-30 10:00").is_err());
        assert!(EventTime::parse("2026-03-01").is_err());
    }

    #[test]
    fn name_identity_ignores_case() {
        let lower = Name::parse("john doe").unwrap();
        let upper = Name::parse("John DOE").unwrap();
        assert!(lower.matches_ignore_case(&upper));
        assert_ne!(lower, upper);
    }

    #[test]
    fn name_allows_repeated_inner_spaces_but_needs_leading_alphanumeric() {
        assert!(Name::is_valid("John  Doe"));
        assert!(Name::is_valid("R2 D2"));
        assert!(!Name::is_valid(" John"));
        assert!(!Name::is_valid("John-Doe"));
        assert_eq!(Name::parse("  John  Doe  ").unwrap().as_str(), "John  Doe");
    }
}
