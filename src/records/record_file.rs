use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Context, Result};

/// Version written into every record envelope.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RecordFile<U> {
    format_version: u32,
    saved_at: DateTime<Utc>,
    units: U,
}

#[derive(Deserialize)]
struct VersionHeader {
    format_version: u32,
}

/// Write `units` to a brand-new file at `path`.
///
/// Returns `Ok(false)` without touching anything when the file already exists.
pub fn write_new<T: Serialize>(path: &Path, units: &[T]) -> Result<bool> {
    let envelope = RecordFile {
        format_version: FORMAT_VERSION,
        saved_at: Utc::now(),
        units,
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => {
            return Err(AppError::message(format!(
                "Failed to create record file {}: {}",
                path.display(),
                err
            )))
        }
    };
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write record file {}", path.display()))?;
    Ok(true)
}

/// Read the units stored at `path`, rejecting envelopes from other format versions.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;

    let header: VersionHeader = serde_json::from_str(&data)?;
    if header.format_version != FORMAT_VERSION {
        return Err(AppError::UnsupportedFormat {
            found: header.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let record: RecordFile<Vec<T>> = serde_json::from_str(&data)?;
    Ok(record.units)
}
