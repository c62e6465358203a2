use chrono::{DateTime, Local};
use std::time::SystemTime;

pub fn format_file_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Name used when a save request resolves to an empty string.
pub fn fallback_config_name() -> String {
    format!("config_{}", Local::now().format("%Y%m%d_%H%M%S"))
}
