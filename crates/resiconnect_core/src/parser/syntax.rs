//! Field prefixes recognized in command arguments.

use std::fmt::{Display, Formatter};

/// Literal marker delimiting one field inside an argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(marker: &'static str) -> Self {
        Self(marker)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("name/");
pub const PREFIX_PHONE: Prefix = Prefix::new("phone/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("email/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_DESCRIPTION: Prefix = Prefix::new("desc/");
pub const PREFIX_MATRIC: Prefix = Prefix::new("matric/");
pub const PREFIX_EMERGENCY: Prefix = Prefix::new("emergency/");
pub const PREFIX_BLOCK: Prefix = Prefix::new("block/");
pub const PREFIX_LEVEL: Prefix = Prefix::new("level/");
pub const PREFIX_ROOM: Prefix = Prefix::new("room/");
pub const PREFIX_DESIGNATION: Prefix = Prefix::new("designation/");

pub const PREFIX_START: Prefix = Prefix::new("start/");
pub const PREFIX_END: Prefix = Prefix::new("end/");
pub const PREFIX_MEMBER_STUDENT: Prefix = Prefix::new("student/");
pub const PREFIX_MEMBER_STAFF: Prefix = Prefix::new("staff/");
pub const PREFIX_MEMBER_EXTERNAL: Prefix = Prefix::new("external/");
