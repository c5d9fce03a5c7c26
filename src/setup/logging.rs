use colored::Colorize;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Maps the number of `-v` flags to a log level, starting at `Info`
#[must_use]
pub const fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Sets up the logging configuration for the application.
///
/// Configures the logger to use colored output based on the log level.
/// `default_log_level` applies unless `RUST_LOG` says otherwise.
pub fn setup_log(default_log_level: LevelFilter) {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            let l = record.level();
            let colored_level = match l {
                log::Level::Error => l.to_string().red().bold(),
                log::Level::Warn => l.to_string().yellow().bold(),
                log::Level::Info => l.to_string().green().bold(),
                log::Level::Debug => l.to_string().blue().bold(),
                log::Level::Trace => l.to_string().purple().bold(),
            };
            writeln!(buf, "{} {}", colored_level, record.args())
        })
        .filter(None, default_log_level)
        .parse_default_env()
        .init();
}
