pub mod file;
pub mod text;
pub mod time;

pub use file::{list_records_with_extension, RecordEntry};
pub use text::{is_plain_stem, sanitize_config_name};
pub use time::{fallback_config_name, format_file_modified};
