use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A record file found on disk, surfaced to the store and the panel selector.
#[derive(Clone, Debug)]
pub struct RecordEntry {
    /// File name without the extension.
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Scan `dir` for regular files ending in `.{extension}`, sorted by name.
pub fn list_records_with_extension(
    dir: impl AsRef<Path>,
    extension: &str,
) -> io::Result<Vec<RecordEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir.as_ref())?.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };

        let Some(name) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|s| s.to_string())
        else {
            continue;
        };

        entries.push(RecordEntry {
            name,
            path,
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_extension_and_strips_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<String> = list_records_with_extension(dir.path(), "json")
            .expect("list")
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = list_records_with_extension(dir.path().join("absent"), "json")
            .expect_err("missing dir");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
