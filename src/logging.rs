//! Logger setup.
//!
//! Records go through the `log` facade to an `env_logger` backend whose output
//! is split three ways: stdout, a log file named after the start time, and an
//! in-memory buffer of recent lines that a debug view can poll with
//! [`recent_logs`].

use std::{
    collections::VecDeque,
    fs::File,
    io::{self, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::config::Config;

/// Lines kept by [`RecentLogs`] before the oldest are dropped.
pub const RECENT_CAPACITY: usize = 1000;

static RECENT: OnceLock<Mutex<RecentLogs>> = OnceLock::new();

fn recent() -> &'static Mutex<RecentLogs> {
    RECENT.get_or_init(|| Mutex::new(RecentLogs::new(RECENT_CAPACITY)))
}

/// Bounded FIFO of formatted log lines.
#[derive(Debug, Clone)]
pub struct RecentLogs {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLogs {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(RECENT_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The newest `max` lines, oldest first.
    pub fn recent(&self, max: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(max);
        self.lines.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The newest `max` log lines recorded since [`init`], oldest first.
pub fn recent_logs(max: usize) -> Vec<String> {
    match recent().lock() {
        Ok(logs) => logs.recent(max),
        Err(poisoned) => poisoned.into_inner().recent(max),
    }
}

/// Splits the logger's byte stream into stdout, an optional file and the
/// recent-lines buffer.
struct TeeWriter {
    file: Option<File>,
    partial: String,
}

impl TeeWriter {
    fn record_lines(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        let Ok(mut logs) = recent().lock() else {
            return;
        };
        while let Some(end) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=end).collect();
            logs.push(line.trim_end().to_string());
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            // A full disk should not take the console down with it.
            if file.write_all(buf).is_err() {
                self.file = None;
            }
        }
        self.record_lines(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

fn open_log_file(dir: &Path) -> anyhow::Result<File> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let path = dir.join(format!("app_{}.log", secs));
    File::create(&path).with_context(|| format!("failed to create log file {}", path.display()))
}

/// Install the global logger.
///
/// A log file that cannot be opened only downgrades to console output; an
/// error is returned when a logger is already installed.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let file = match open_log_file(&config.log_dir) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: logging to console only: {:#}", e);
            None
        }
    };

    let env = env_logger::Env::default().default_filter_or(config.log_filter.as_str());
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter {
            file,
            partial: String::new(),
        })))
        .try_init()
        .context("a logger is already installed")?;
    Ok(())
}
