//! Keeps recent log records in memory; stderr is hidden behind the
//! alternate screen while the preview runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

const CAPACITY: usize = 64;

pub struct RecentLog {
    lines: Mutex<VecDeque<String>>,
}

static LOGGER: RecentLog = RecentLog::new();

impl RecentLog {
    pub const fn new() -> Self {
        Self {
            lines: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == CAPACITY {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    pub fn latest(&self) -> Option<String> {
        self.lines.lock().ok()?.back().cloned()
    }

    pub fn drain(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut lines| lines.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Log for RecentLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(format!("{:<5} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("{e}"))?;
    log::set_max_level(level);
    Ok(())
}

pub fn latest() -> Option<String> {
    LOGGER.latest()
}

/// Everything still buffered, oldest first.
pub fn drain() -> Vec<String> {
    LOGGER.drain()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_lines() {
        let log = RecentLog::new();
        for i in 0..CAPACITY + 3 {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.latest().as_deref(), Some("line 66"));
        let lines = log.drain();
        assert_eq!(lines.len(), CAPACITY);
        assert_eq!(lines[0], "line 3");
        assert_eq!(log.latest(), None);
    }
}
