//! Home directory and configuration loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs_next::home_dir;

use crate::config::{Config, ConfigOverrides, ResolvedConfig};
use crate::error::{Error, Result};

/// Environment variable naming the plates home directory.
pub const HOME_ENV: &str = "PLATES_HOME";

pub struct AppState {
    pub config: Config,
    pub home_dir: PathBuf,
    pub config_path: PathBuf,
}

impl AppState {
    /// Load AppState with optional home directory override.
    ///
    /// Precedence for the home directory:
    /// 1. `home_override` parameter (from `--home` or JSON `home`)
    /// 2. `PLATES_HOME` environment variable
    /// 3. `~/.plates` default
    pub fn load(home_override: Option<PathBuf>) -> Result<Self> {
        let home = if let Some(path) = home_override {
            path
        } else if let Ok(plates_home) = std::env::var(HOME_ENV) {
            PathBuf::from(plates_home)
        } else {
            home_dir()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?
                .join(".plates")
        };
        Self::from_dir(home)
    }

    /// Load AppState rooted at `home_dir`, creating it if needed.
    pub fn from_dir(home_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&home_dir)?;
        let config_path = home_dir.join("config.toml");
        let config = load_config(&config_path)?;
        log::debug!("plates home: {}", home_dir.display());
        Ok(Self {
            config,
            home_dir,
            config_path,
        })
    }

    pub fn resolve_config(&self, overrides: &ConfigOverrides) -> ResolvedConfig {
        self.config.resolve(&self.home_dir, overrides)
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::search::SearchStrategy;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_home_dir() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("nested/home");
        let app = AppState::load(Some(home.clone())).unwrap();
        assert!(home.is_dir());
        assert_eq!(app.home_dir, home);
        assert_eq!(app.config, Config::default());
    }

    #[test]
    fn test_load_reads_config_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "search_strategy = \"sequential\"\nauto_save = false\n",
        )
        .unwrap();
        let app = AppState::load(Some(tmp.path().to_path_buf())).unwrap();
        let resolved = app.resolve_config(&ConfigOverrides::default());
        assert_eq!(resolved.search_strategy, SearchStrategy::Sequential);
        assert!(!resolved.auto_save);
        assert_eq!(resolved.working_file, tmp.path().join("plates.txt"));
    }

    #[test]
    fn test_bad_config_reports_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "auto_save = \"maybe\"").unwrap();
        let err = AppState::load(Some(tmp.path().to_path_buf()))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("config.toml"));
    }
}
