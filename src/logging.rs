//! `log` backend for the browser console.
//!
//! The library only emits through the `log` facade; the page that embeds it
//! calls [`init_logging`] once at start-up.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!(
        "[{}] {} {}",
        record.level(),
        record.target().to_ascii_lowercase(),
        record.args()
    )
}

/// Install the console logger. Calling it again only adjusts the level.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_level_and_target() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("opening checkout {}", "adenike-iftar-1"))
                .level(Level::Info)
                .target("yew_paystack::flow")
                .build(),
        );
        assert_eq!(line, "[INFO] yew_paystack::flow opening checkout adenike-iftar-1");
    }
}
