use {
    log::{Level, Log, Metadata, Record, SetLoggerError},
    std::{
        fmt::Write as FmtWrite,
        io::Write,
        sync::atomic::{AtomicUsize, Ordering::Relaxed},
        time::SystemTime,
    },
};

static LEVEL: AtomicUsize = AtomicUsize::new(Level::Info as usize);

static LOGGER: Logger = Logger;

/// Writes log records to stderr.
pub struct Logger;

impl Logger {
    pub fn install_stderr(level: Level) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        set_level(level);
        Ok(())
    }
}

pub fn set_level(level: Level) {
    LEVEL.store(level as usize, Relaxed);
    log::set_max_level(level.to_level_filter());
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= LEVEL.load(Relaxed)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut buf = String::new();
        let now = humantime::format_rfc3339_millis(SystemTime::now());
        let _ = match record.module_path() {
            Some(mp) => writeln!(buf, "[{} {:5} {}] {}", now, record.level(), mp, record.args()),
            _ => writeln!(buf, "[{} {:5}] {}", now, record.level(), record.args()),
        };
        let _ = std::io::stderr().lock().write_all(buf.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().lock().flush();
    }
}
