use {
    crate::logger::{self, Logger},
    log::Level,
    std::sync::Once,
};

static INSTALL: Once = Once::new();

pub fn install() {
    INSTALL.call_once(|| {
        if let Err(e) = Logger::install_stderr(Level::Info) {
            eprintln!("Could not install the logger: {}", e);
        }
    });
}

pub fn set_level(level: Level) {
    logger::set_level(level);
}
