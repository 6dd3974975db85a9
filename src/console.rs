//! Timestamped progress lines on stdout.
//!
//! Every step of a session is reported as `### [YYYY-MM-DDTHH:MM:SS] message`.
//! Diagnostics that only matter when debugging go through `tracing` instead.

use chrono::{Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Print a log line stamped with the current local time.
pub fn log(message: impl AsRef<str>) {
    let now = Local::now().naive_local();
    println!("{}", format_line(now, message.as_ref()));
}

/// Render one console log line for the given instant.
pub fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("### [{}] {}", at.format(TIMESTAMP_FORMAT), message)
}
