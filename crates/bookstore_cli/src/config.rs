//! Fixed runtime locations for the terminal front end.

use bookstore_core::{default_log_level, LogLevel};
use std::io;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "ebookstore.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Where the catalogue and logs live for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Places the database and `logs/` under `base_dir`.
    pub fn in_dir(base_dir: &Path) -> Self {
        Self {
            db_path: base_dir.join(DB_FILE_NAME),
            log_dir: base_dir.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }

    /// Uses the process working directory as the base directory.
    pub fn from_working_dir() -> io::Result<Self> {
        let base_dir = std::env::current_dir()?;
        Ok(Self::in_dir(&base_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use std::path::Path;

    #[test]
    fn in_dir_uses_fixed_names() {
        let config = CliConfig::in_dir(Path::new("/srv/shop"));
        assert_eq!(config.db_path, Path::new("/srv/shop/ebookstore.sqlite3"));
        assert_eq!(config.log_dir, Path::new("/srv/shop/logs"));
    }
}
