use log::{Level, Metadata, Record};

pub static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// 输出到 stderr, 保证 stdout 上的 JSON 结果不被日志污染
pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => {
                    eprintln!("🟥 ERROR: {}", record.args());
                }
                Level::Warn => {
                    eprintln!("🟨 WARN: {}", record.args());
                }
                Level::Info => {
                    eprintln!("🟦 INFO: {}", record.args());
                }
                Level::Debug => {
                    eprintln!("🟩 DEBUG: {}", record.args());
                }
                Level::Trace => {
                    eprintln!("🟪 TRACE: {}", record.args());
                }
            }
        }
    }

    fn flush(&self) {}
}
