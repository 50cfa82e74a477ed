//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Continuation lines for multi-line messages
//! - Dual output (console + file)
//! - Broken pipe handling for piped commands

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;

/// Format and output a log message
pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string().dimmed();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let tag_str = format_tag(tag);
    let level_str = format_level(level);
    let tag_clean = tag.to_plain_string();

    for (index, line) in message.split('\n').enumerate() {
        let console_line = if index == 0 {
            format!("{} [{}] [{}] {}", time, tag_str, level_str, line)
        } else {
            // Align continuation lines under the message column
            format!(
                "{}{}",
                " ".repeat(9 + TAG_WIDTH + LEVEL_WIDTH + 6),
                line
            )
        };
        print_stdout_safe(&console_line);

        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            tag_clean,
            level.as_str(),
            line
        ));
    }
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Rpc => label.bright_cyan().bold(),
        LogTag::Poller => label.bright_blue().bold(),
        LogTag::Metrics => label.bright_green().bold(),
        LogTag::Webserver => label.bright_magenta().bold(),
        LogTag::Test => label.blue().bold(),
        LogTag::Other(_) => label.white().bold(),
    }
}

/// Format log level with appropriate color
fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

/// Print to stdout but ignore broken pipe errors
fn print_stdout_safe(message: &str) {
    let mut out = stdout().lock();
    if let Err(e) = writeln!(out, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(std::io::stderr(), "Logger stdout error: {}", e);
    }
    if let Err(e) = out.flush() {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}
