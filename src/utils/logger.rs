use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::Level;
use std::io::Write;

/// Colours used for scan summaries.
pub struct Colors;

impl Colors {
    pub const COURSE: &'static str = "course";
    pub const VIDEO: &'static str = "video";
    pub const SKIPPED: &'static str = "skipped";

    pub fn colorize(kind: &str, text: &str) -> ColoredString {
        match kind {
            Self::COURSE => text.green(),
            Self::VIDEO => text.cyan(),
            Self::SKIPPED => text.yellow(),
            _ => text.normal(),
        }
    }
}

pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // try_init: tests and repeated handler calls may set up logging more than once
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        Level::Error => "ERROR".red(),
                        _ => unreachable!(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}
