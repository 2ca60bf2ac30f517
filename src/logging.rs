//! Chat log persistence layer
//!
//! Provides file-based logging of transcript lines organized by session.
//! Logs are stored in XDG_DATA_HOME/hecker-client/logs/ with the structure:
//! logs/session/YYYY-MM-DD.log

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// A log entry to be written to disk
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub session: String,
    pub timestamp: String,
    pub sender: String,
    pub message: String,
}

/// Logger manages file-based chat logging without blocking the UI thread
pub struct Logger {
    /// Channel to send log entries to the background thread
    tx: Sender<LogEntry>,
    handle: Option<JoinHandle<()>>,
}

impl Logger {
    /// Create a logger writing under the platform data directory
    pub fn new() -> Result<Self, String> {
        let log_dir = get_log_directory()?;
        Self::with_directory(log_dir)
    }

    /// Create a logger writing under `log_dir` and spawn the writer thread
    pub fn with_directory(log_dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;

        let (tx, rx) = unbounded::<LogEntry>();

        // Spawn background thread for non-blocking I/O
        let handle = thread::spawn(move || {
            run_logger_thread(rx, log_dir);
        });

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// Log a message (non-blocking, queued for background writing)
    pub fn log(&self, entry: LogEntry) {
        // If send fails, the logger thread has stopped - silently ignore
        let _ = self.tx.send(entry);
    }

    /// Stop accepting entries and wait until everything queued is on disk
    pub fn shutdown(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

/// Background thread that handles all file I/O
fn run_logger_thread(rx: Receiver<LogEntry>, log_dir: PathBuf) {
    // Cache of open file handles to avoid reopening files constantly
    let mut file_cache: HashMap<String, BufWriter<File>> = HashMap::new();

    // Process log entries as they arrive
    while let Ok(entry) = rx.recv() {
        if let Err(e) = write_log_entry(&mut file_cache, &log_dir, &entry) {
            tracing::warn!("Logger error: {}", e);
        }
    }

    // Flush all cached files on shutdown
    for (_, mut writer) in file_cache.drain() {
        let _ = writer.flush();
    }
}

/// Write a single log entry to the appropriate file
fn write_log_entry(
    file_cache: &mut HashMap<String, BufWriter<File>>,
    log_dir: &Path,
    entry: &LogEntry,
) -> Result<(), String> {
    // Build path: logs/session/YYYY-MM-DD.log
    let date = Local::now().format("%Y-%m-%d").to_string();
    let sanitized_session = sanitize_filename(&entry.session);

    let session_dir = log_dir.join(&sanitized_session);
    let cache_key = format!("{}/{}", sanitized_session, date);

    let writer = match file_cache.entry(cache_key) {
        Entry::Occupied(e) => e.into_mut(),
        Entry::Vacant(v) => {
            fs::create_dir_all(&session_dir)
                .map_err(|e| format!("Failed to create session directory: {}", e))?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(session_dir.join(format!("{}.log", date)))
                .map_err(|e| format!("Failed to open log file: {}", e))?;
            v.insert(BufWriter::new(file))
        }
    };

    // Multi-line messages stay on one log line
    let message = entry.message.replace('\n', " ⏎ ");

    // Format: [HH:MM:SS] <Sender> Message
    writeln!(writer, "[{}] <{}> {}", entry.timestamp, entry.sender, message)
        .map_err(|e| format!("Failed to write log entry: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush log: {}", e))?;

    Ok(())
}

/// Get the platform-specific log directory using XDG conventions
fn get_log_directory() -> Result<PathBuf, String> {
    let base = directories::BaseDirs::new().ok_or("Failed to determine home directory")?;

    // Use XDG_DATA_HOME on Linux, equivalent on other platforms
    let data_dir = base.data_dir();
    Ok(data_dir.join("hecker-client").join("logs"))
}

/// Sanitize a filename to be filesystem-safe
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("session_1700000000000"), "session_1700000000000");
        assert_eq!(sanitize_filename("a/b:c"), "a_b_c");
    }

    #[test]
    fn test_log_directory_location() {
        let result = get_log_directory();
        assert!(result.is_ok());
        let path = result.unwrap();
        assert!(path.to_string_lossy().contains("hecker-client"));
    }

    #[test]
    fn test_entries_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::with_directory(dir.path().to_path_buf()).unwrap();

        logger.log(LogEntry {
            session: "session_42".into(),
            timestamp: "10:00:00".into(),
            sender: "You".into(),
            message: "How do I relax?".into(),
        });
        logger.log(LogEntry {
            session: "session_42".into(),
            timestamp: "10:00:02".into(),
            sender: "Hecker".into(),
            message: "Step 1: breathe\nStep 2: rest".into(),
        });
        logger.shutdown();

        let date = Local::now().format("%Y-%m-%d").to_string();
        let content =
            fs::read_to_string(dir.path().join("session_42").join(format!("{}.log", date)))
                .unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[10:00:00] <You> How do I relax?");
        assert_eq!(lines[1], "[10:00:02] <Hecker> Step 1: breathe ⏎ Step 2: rest");
    }
}
