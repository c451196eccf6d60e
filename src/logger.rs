use colored::{ColoredString, Colorize};
use log::{Level, Metadata, Record};

pub struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            // Plain status lines, no label.
            Level::Info => println!("{}", record.args()),
            Level::Debug | Level::Trace => {
                println!(
                    "{} {} {}",
                    label(record.level()),
                    record.target().dimmed(),
                    record.args()
                );
            }
            level => println!("{} {}", label(level), record.args()),
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Debug => "[DEBUG]".bold().blue(),
        Level::Error => "[ERROR]".bold().red(),
        Level::Info => "[INFO]".bold().green(),
        Level::Trace => "[TRACE]".bold().purple(),
        Level::Warn => "[WARN]".bold().yellow(),
    }
}
