//! Process logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize rolling file logs (plus stderr echo) exactly once per process.
//! - Keep emitted events metadata-only: ids, counts, durations, never names,
//!   emails or notes.
//!
//! # Invariants
//! - Initialization is idempotent for identical settings.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "intern_tracker";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    log_dir: PathBuf,
}

impl LogSettings {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = match level.trim().parse::<LevelFilter>() {
            Ok(LevelFilter::Off) | Err(_) => {
                return Err(format!(
                    "unsupported log level `{}`; expected trace|debug|info|warn|error",
                    level.trim()
                ))
            }
            Ok(level) => level,
        };

        let dir = Path::new(log_dir.trim());
        if dir.as_os_str().is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        if !dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                dir.display()
            ));
        }

        Ok(Self {
            level,
            log_dir: dir.to_path_buf(),
        })
    }

    /// Lowercase spec string understood by `flexi_logger`.
    fn level_spec(&self) -> String {
        self.level.as_str().to_ascii_lowercase()
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Initializes logging with `level` and an absolute `log_dir`.
///
/// # Errors
/// - Unsupported level, empty or relative directory.
/// - Directory creation or logger backend failure.
/// - Settings that differ from an earlier successful call.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;
    let active = ACTIVE_LOGGER.get_or_try_init(|| start(requested.clone()))?;

    if active.settings == requested {
        return Ok(());
    }
    Err(format!(
        "logging already running (level={}, log_dir=`{}`); refusing to switch to level={}, log_dir=`{}`",
        active.settings.level_spec(),
        active.settings.log_dir.display(),
        requested.level_spec(),
        requested.log_dir.display()
    ))
}

/// Returns `(level, log_dir)` once logging is active.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.settings.level, active.settings.log_dir.clone()))
}

/// Default level: `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.log_dir)
        .map_err(|err| format!("cannot create `{}`: {err}", settings.log_dir.display()))?;

    let files = FileSpec::default()
        .directory(settings.log_dir.as_path())
        .basename(LOG_FILE_BASENAME);
    let handle = Logger::try_with_str(settings.level_spec())
        .map_err(|err| format!("logger spec rejected: {err}"))?
        .log_to_file(files)
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::Info)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("logger backend failed to start: {err}"))?;

    if PANIC_HOOK.set(()).is_ok() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic| {
            let (location, payload) = panic_summary(panic);
            error!(
                "event=panic_captured module=core status=error location={location} payload={payload}"
            );
            previous(panic);
        }));
    }

    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={}",
        settings.level_spec(),
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

/// Location and single-line, length-capped payload of a panic.
fn panic_summary(panic: &PanicHookInfo<'_>) -> (String, String) {
    let location = match panic.location() {
        Some(at) => format!("{}:{}", at.file(), at.line()),
        None => "unknown".to_string(),
    };
    let payload = if let Some(text) = panic.payload().downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = panic.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };
    (location, single_line(&payload, MAX_PANIC_PAYLOAD_CHARS))
}

fn single_line(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars().map(|ch| match ch {
        '\n' | '\r' => ' ',
        other => other,
    });
    let mut line: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}
