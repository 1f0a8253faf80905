//! Core domain logic for ResiConnect, a residence contact and event directory.
//! This crate is the single source of truth for parsing rules, directory
//! invariants and the persisted document format.

pub mod command;
pub mod config;
pub mod index;
pub mod logging;
pub mod messages;
pub mod model;
pub mod parser;
pub mod storage;

pub use command::{Command, CommandError, CommandOutcome, CommandResult};
pub use config::{AppConfig, ConfigError, LogSettings};
pub use index::Index;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::directory::{Directory, DirectoryChange, DirectorySnapshot};
pub use model::manager::{ListKind, ModelManager};
pub use parser::{parse_command, ParseError};
pub use storage::{JsonDirectoryStorage, StorageError, StorageResult};

