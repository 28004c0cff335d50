//! Logging built on `tracing`.
//!
//! Library code only ever emits events through the `tracing` macros. Where the
//! events end up is decided by the installed subscriber: the global one set up
//! by [`init`], or a scoped one writing into a [`StringLogger`] or
//! [`FileLogger`].

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LogConfig;
use crate::parser::ParseValue;

/// Install the global subscriber with the default [`LogConfig`].
///
/// Panics if a global subscriber has already been set.
pub fn init() {
    init_with(&LogConfig::default());
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `config.filter`.
///
/// Panics if a global subscriber has already been set.
pub fn init_with(config: &LogConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .init();
}

/// Like [`init_with`], but reports an already-installed subscriber as an error.
pub fn try_init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init()
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Message severities understood by the logging helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Logged at `ERROR` with a `fatal = true` field.
    Fatal,
}

impl Severity {
    /// The `tracing` level events of this severity are emitted at.
    pub fn level(self) -> Level {
        match self {
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error | Severity::Fatal => Level::ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParseValue for Severity {
    fn parse_value(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }

    fn format_value(&self) -> String {
        self.as_str().to_string()
    }
}

/// Emit `message` at [`Severity::level`].
pub fn log(severity: Severity, message: &str) {
    let level = severity.level();
    if severity == Severity::Fatal {
        tracing::error!(fatal = true, "{}", message);
    } else if level == Level::INFO {
        tracing::info!("{}", message);
    } else if level == Level::WARN {
        tracing::warn!("{}", message);
    } else {
        tracing::error!("{}", message);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A writer that panicked mid-line leaves at worst a truncated line.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory log sink.
///
/// Clones share the same buffer, so a clone handed to a subscriber can be
/// inspected through the original.
///
/// ```
/// use tessera_core::logging::StringLogger;
/// use tracing::Level;
///
/// let logger = StringLogger::new();
/// tracing::subscriber::with_default(logger.subscriber(Level::INFO), || {
///     tracing::warn!("texture missing");
/// });
/// assert!(logger.contents().contains("texture missing"));
/// ```
#[derive(Debug, Clone)]
pub struct StringLogger {
    buffer: Arc<Mutex<Vec<u8>>>,
    active: Arc<AtomicBool>,
}

impl Default for StringLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLogger {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.buffer)).into_owned()
    }

    pub fn clear(&self) {
        lock(&self.buffer).clear();
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// An inactive logger discards everything written to it.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// A subscriber that formats events at `max_level` and below into this
    /// logger, without ANSI colour codes.
    pub fn subscriber(&self, max_level: Level) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }
}

/// Writer produced by [`StringLogger`] for each event.
pub struct StringWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
    active: bool,
}

impl Write for StringWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.active {
            lock(&self.buffer).extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for StringLogger {
    type Writer = StringWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StringWriter {
            buffer: Arc::clone(&self.buffer),
            active: self.is_active(),
        }
    }
}

/// Log sink writing to a file. The file is truncated when the logger is
/// created.
#[derive(Debug, Clone)]
pub struct FileLogger {
    file: Arc<Mutex<File>>,
    path: PathBuf,
    active: Arc<AtomicBool>,
}

impl FileLogger {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::create(&path)?;
        writeln!(file, "log opened: {}", path.display())?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path,
            active: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// An inactive logger discards everything written to it.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// A subscriber that formats events at `max_level` and below into the file.
    pub fn subscriber(&self, max_level: Level) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }
}

/// Writer produced by [`FileLogger`] for each event.
pub struct FileWriter {
    file: Arc<Mutex<File>>,
    active: bool,
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.active {
            return Ok(buf.len());
        }
        lock(&self.file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.file).flush()
    }
}

impl<'a> MakeWriter<'a> for FileLogger {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
            active: self.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::Info.level(), Level::INFO);
        assert_eq!(Severity::Warning.level(), Level::WARN);
        assert_eq!(Severity::Error.level(), Level::ERROR);
        assert_eq!(Severity::Fatal.level(), Level::ERROR);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse_value("WARN"), Some(Severity::Warning));
        assert_eq!(Severity::parse_value(" fatal "), Some(Severity::Fatal));
        assert_eq!(Severity::parse_value("loud"), None);
        assert_eq!(Severity::Error.format_value(), "error");
    }

    #[test]
    fn test_string_logger_captures_levels() {
        let logger = StringLogger::new();
        tracing::subscriber::with_default(logger.subscriber(Level::INFO), || {
            log(Severity::Info, "loading level one");
            log(Severity::Fatal, "renderer lost");
            tracing::debug!("filtered out");
        });

        let contents = logger.contents();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("loading level one"));
        assert!(contents.contains("renderer lost"));
        assert!(contents.contains("fatal=true"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_log_uses_severity_level() {
        let logger = StringLogger::new();
        tracing::subscriber::with_default(logger.subscriber(Level::WARN), || {
            log(Severity::Info, "below threshold");
            log(Severity::Warning, "texture missing");
            log(Severity::Error, "shader failed");
        });

        let contents = logger.contents();
        assert!(!contents.contains("below threshold"));
        assert!(contents.contains("WARN"));
        assert!(contents.contains("texture missing"));
        assert!(contents.contains("ERROR"));
        assert!(contents.contains("shader failed"));
        assert!(!contents.contains("fatal=true"));
    }

    #[test]
    fn test_string_logger_inactive_discards() {
        let logger = StringLogger::new();
        logger.set_active(false);
        tracing::subscriber::with_default(logger.subscriber(Level::INFO), || {
            tracing::warn!("dropped");
        });
        assert!(logger.contents().is_empty());

        logger.set_active(true);
        tracing::subscriber::with_default(logger.subscriber(Level::INFO), || {
            tracing::warn!("kept");
        });
        assert!(logger.contents().contains("kept"));

        logger.clear();
        assert!(logger.contents().is_empty());
    }

    #[test]
    fn test_file_logger_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        let logger = FileLogger::create(&path).unwrap();

        tracing::subscriber::with_default(logger.subscriber(Level::WARN), || {
            tracing::error!("music stream failed");
            tracing::info!("below threshold");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("log opened:"));
        assert!(written.contains("music stream failed"));
        assert!(!written.contains("below threshold"));
    }
}
