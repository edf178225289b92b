use colored::Colorize;
use log::{SetLoggerError, LevelFilter, Record, Level, Metadata};

static LOGGER: SimpleLogger = SimpleLogger;

/**
 * Installs the coloured logger at the given level.
 * Only the first call installs the logger; later calls just change the level.
 */
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
	log::set_max_level(level);
	log::set_logger(&LOGGER)
}

/** Reads a level name such as "info" or "warn", defaulting to info. */
pub fn parse_level(level: Option<&str>) -> LevelFilter {
	level.and_then(|l| l.parse().ok()).unwrap_or(LevelFilter::Info)
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			match record.level() {
				Level::Error => println!("{}", format!("{}", record.args()).red()),
				Level::Warn => println!("{}", format!("{}", record.args()).blue()),
				Level::Info => println!("{}", record.args()),
				Level::Debug => println!("{}", format!("{}", record.args()).purple()),
				Level::Trace => println!("{}", record.args()),
			}
		}
	}

	fn flush(&self) {}
}
