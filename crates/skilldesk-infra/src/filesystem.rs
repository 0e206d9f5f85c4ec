//! Data directory layout.
//!
//! Everything SkillDesk persists lives under one directory: the SQLite
//! database and `config.toml`.

use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "SKILLDESK_DATA_DIR";
const DATABASE_FILE: &str = "skilldesk.db";

/// `$SKILLDESK_DATA_DIR` when set, otherwise `~/.skilldesk` (or
/// `./.skilldesk` when there is no home directory).
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_default()
            .join(".skilldesk"),
    }
}

/// SQLite connection URL for the database inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join(DATABASE_FILE).display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url() {
        let url = database_url(Path::new("/srv/skilldesk"));
        assert_eq!(url, "sqlite:///srv/skilldesk/skilldesk.db?mode=rwc");
    }

    #[test]
    fn test_data_dir_env_override() {
        // SAFETY: no other test in this crate reads or writes this variable.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-skilldesk");
        }
        let overridden = resolve_data_dir();
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "");
        }
        let fallback = resolve_data_dir();
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }

        assert_eq!(overridden, PathBuf::from("/tmp/test-skilldesk"));
        assert!(fallback.ends_with(".skilldesk"));
    }
}
