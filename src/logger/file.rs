//! File sink for log lines
//!
//! Lines are appended to a buffered writer; `flush_file_logging` is called
//! on shutdown. When file logging was never initialised every call is a no-op.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open (or create) the log file in append mode
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    *LOG_FILE.lock() = Some(BufWriter::new(file));
    Ok(())
}

/// Append one line to the log file
pub fn write_to_file(line: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(writer) = guard.as_mut() {
        // A failing disk must never take the service down
        let _ = writeln!(writer, "{}", line);
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = LOG_FILE.lock().as_mut() {
        let _ = writer.flush();
    }
}
