//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Start size-rotated file logging once per process from `LogSettings`.
//! - Capture panics as sanitized metadata-only log lines.
//!
//! # Invariants
//! - Lines carry command words, counts and error codes, never field values.
//! - Init is idempotent for identical settings; conflicting settings are
//!   rejected.
//! - Initialization must not panic.

use crate::config::LogSettings;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::panic::PanicHookInfo;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "resiconnect";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

/// Accepted spellings mapped to flexi_logger level specs.
const LEVELS: &[(&str, &str)] = &[
    ("trace", "trace"),
    ("debug", "debug"),
    ("info", "info"),
    ("warn", "warn"),
    ("warning", "warn"),
    ("error", "error"),
];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct LoggingState {
    settings: LogSettings,
    _logger: LoggerHandle,
}

/// Initializes file logging from `settings`.
///
/// Returns `Ok(())` when logging is active, or a human-readable error string
/// when initialization fails.
///
/// # Errors
/// - The level is not one of trace|debug|info|warn|error.
/// - The directory is relative or cannot be created.
/// - Logging is already active with different settings.
pub fn init_logging(settings: &LogSettings) -> Result<(), String> {
    let requested = LogSettings {
        level: normalize_level(&settings.level)?.to_string(),
        log_dir: settings.log_dir.clone(),
    };
    ensure_absolute(&requested.log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = start_file_logger(&requested)?;
        install_panic_hook();
        info!(
            "event=app_start module=core status=ok platform={} debug_build={} version={}",
            std::env::consts::OS,
            cfg!(debug_assertions),
            env!("CARGO_PKG_VERSION")
        );
        info!(
            "event=core_init module=core status=ok level={} log_dir={}",
            requested.level,
            requested.log_dir.display()
        );
        Ok(LoggingState {
            settings: requested.clone(),
            _logger: logger,
        })
    })?;

    state.ensure_matches(&requested)
}

impl LoggingState {
    fn ensure_matches(&self, requested: &LogSettings) -> Result<(), String> {
        let active = &self.settings;
        if active.log_dir != requested.log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                active.log_dir.display(),
                requested.log_dir.display()
            ));
        }
        if active.level != requested.level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                active.level, requested.level
            ));
        }
        Ok(())
    }
}

fn start_file_logger(settings: &LogSettings) -> Result<LoggerHandle, String> {
    let log_dir = settings.log_dir.as_path();
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    Logger::try_with_str(&settings.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

/// Returns the settings logging was started with, if any.
pub fn logging_status() -> Option<LogSettings> {
    LOGGING_STATE.get().map(|state| state.settings.clone())
}

/// Level used when the config file does not name one.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, spec)| *spec)
        .ok_or_else(|| {
            format!("unsupported log level `{wanted}`; expected trace|debug|info|warn|error")
        })
}

fn ensure_absolute(log_dir: &Path) -> Result<(), String> {
    if log_dir.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if log_dir.is_relative() {
        return Err(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        ));
    }
    Ok(())
}

fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!(
                "event=panic_captured module=core status=error location={} payload={}",
                location,
                panic_summary(info)
            );
            previous(info);
        }));
    });
}

// Payloads may echo user input; flatten and cap before logging.
fn panic_summary(info: &PanicHookInfo<'_>) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    single_line_capped(payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn single_line_capped(value: &str, max_chars: usize) -> String {
    let mut chars = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch });
    let mut capped: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        capped.push_str("...");
    }
    capped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::io::Write;

    #[test]
    fn level_aliases_map_to_logger_specs() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        let err = normalize_level("verbose").unwrap_err();
        assert!(err.contains("unsupported log level `verbose`"));
    }

    #[test]
    fn relative_log_dir_is_rejected_before_logger_starts() {
        let settings = LogSettings {
            level: "info".to_string(),
            log_dir: "logs".into(),
        };
        let err = init_logging(&settings).unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn panic_payload_is_flattened_and_capped() {
        assert_eq!(single_line_capped("Alice\n98765432", 40), "Alice 98765432");
        assert_eq!(single_line_capped("abcdefgh", 8), "abcdefgh");
        assert_eq!(single_line_capped("abcdefghij", 8), "abcdefgh...");
    }

    #[test]
    fn config_settings_start_logging_once_and_reject_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config_path = dir.path().join("resiconnect.config.json");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            r#"{{"log_level": "INFO", "log_dir": {}}}"#,
            serde_json::to_string(&log_dir).unwrap()
        )
        .unwrap();

        let settings = AppConfig::load(&config_path).unwrap().log_settings();
        init_logging(&settings).unwrap();
        init_logging(&settings).unwrap();
        assert_eq!(logging_status(), Some(settings.clone()));
        assert!(log_dir.is_dir());

        let louder = LogSettings {
            level: "debug".to_string(),
            ..settings.clone()
        };
        assert!(init_logging(&louder).unwrap_err().contains("refusing to switch"));

        let elsewhere = LogSettings {
            log_dir: dir.path().join("other"),
            ..settings
        };
        assert!(init_logging(&elsewhere).unwrap_err().contains("refusing to switch"));
    }
}
