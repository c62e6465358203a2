use std::env;
use std::path::{Path, PathBuf};

/// Directory name used for saved configurations when nothing else is configured.
pub const DEFAULT_STORE_DIR: &str = "rcn_configs";

/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "RCN_CONFIG_DIR";

/// Environment variable pointing at the installed extension.
pub const EXTENSION_DIR_ENV: &str = "RCN_EXTENSION_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub store_dir: PathBuf,
    /// Location the settings extension must exist at. `None` means the
    /// built-in request-file extension is always available.
    pub extension_dir: Option<PathBuf>,
    pub watch_store: bool,
}

impl Config {
    /// Defaults: a store next to the executable, no extension requirement, watching on.
    pub fn builtin() -> Self {
        let base = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            store_dir: base.join(DEFAULT_STORE_DIR),
            extension_dir: None,
            watch_store: true,
        }
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = env::var_os(STORE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.store_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os(EXTENSION_DIR_ENV).filter(|v| !v.is_empty()) {
            self.extension_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    pub fn with_extension_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extension_dir = Some(dir.into());
        self
    }

    pub fn with_watch_store(mut self, watch: bool) -> Self {
        self.watch_store = watch;
        self
    }
}
