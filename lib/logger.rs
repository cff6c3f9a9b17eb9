use log::{Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

enum Sink {
    File(File),
    Console,
}

/// Process wide `log` backend, lines look like
/// `[2024-06-01 12:00:00.000123 INFO lib/session/file_session.rs:37] open foo.txt fd 3`
pub struct Logger {
    sinks: Mutex<Vec<Sink>>,
}

static G_LOGGER: Lazy<Logger> = Lazy::new(|| Logger {
    sinks: Mutex::new(Vec::new()),
});

impl Logger {
    /// install the logger, calling it again returns the same instance
    pub fn init() -> &'static Logger {
        let l: &'static Logger = &G_LOGGER;
        let _ = log::set_logger(l);
        l
    }

    pub fn add_file<P: AsRef<Path>>(&self, path: P, trunc: bool) -> &Self {
        let path = path.as_ref();
        let r = File::options()
            .create(true)
            .write(true)
            .append(!trunc)
            .truncate(trunc)
            .open(path);
        match r {
            Ok(f) => self.push(Sink::File(f)),
            Err(e) => eprintln!("can't open log file {} error {}", path.display(), e),
        }
        self
    }

    pub fn add_console(&self) -> &Self {
        self.push(Sink::Console);
        self
    }

    fn push(&self, s: Sink) {
        if let Ok(mut sinks) = self.sinks.lock() {
            sinks.push(s);
        }
    }

    fn format(record: &Record) -> String {
        format!(
            "[{} {} {}:{}] {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            record.level(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        if let Ok(mut sinks) = self.sinks.lock() {
            for s in sinks.iter_mut() {
                let _ = match s {
                    Sink::File(f) => f.write_all(line.as_bytes()),
                    Sink::Console => std::io::stderr().write_all(line.as_bytes()),
                };
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut sinks) = self.sinks.lock() {
            for s in sinks.iter_mut() {
                if let Sink::File(f) = s {
                    let _ = f.flush();
                }
            }
        }
    }
}
