//! Reading and writing registry files on disk.
//!
//! The codec works on in-memory text; this module owns the file I/O around
//! it: the working file the front ends keep between invocations, explicit
//! imports and exports, and auto-named day files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, SaveError};
use crate::naming::next_day_file;
use crate::registry::{ImportSummary, Registry};
use crate::safe_io::atomic_write_text;

/// Loads the working file into a fresh registry. A missing file is an empty
/// registry.
pub fn load_working(path: &Path) -> Result<Registry> {
    let mut registry = Registry::new();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no working file at {}, starting empty", path.display());
            return Ok(registry);
        }
        Err(e) => return Err(e.into()),
    };
    let summary = registry.load_from_text(&text)?;
    for warning in &summary.warnings {
        log::warn!("{}: {warning}", path.display());
    }
    Ok(registry)
}

/// Persists the working file, empty or not.
pub fn write_working(registry: &Registry, path: &Path) -> Result<()> {
    atomic_write_text(path, &registry.save_to_text())?;
    log::debug!("wrote working file {}", path.display());
    Ok(())
}

/// Merges `path` into `registry`.
pub fn import_file(registry: &mut Registry, path: &Path) -> Result<ImportSummary> {
    let text = fs::read_to_string(path)?;
    let summary = registry.load_from_text(&text)?;
    log::info!(
        "imported {} plate(s) from {}",
        summary.imported(),
        path.display()
    );
    Ok(summary)
}

/// Explicit save. Refuses to write an empty registry.
pub fn save_file(registry: &Registry, path: &Path) -> Result<()> {
    if registry.is_empty() {
        return Err(SaveError::NothingToSave.into());
    }
    atomic_write_text(path, &registry.save_to_text())?;
    log::info!("saved {} plate(s) to {}", registry.len(), path.display());
    Ok(())
}

/// Explicit save to the next free day file in `dir`.
pub fn save_next_day_file(registry: &Registry, dir: &Path) -> Result<PathBuf> {
    if registry.is_empty() {
        return Err(SaveError::NothingToSave.into());
    }
    let path = next_day_file(dir)?;
    save_file(registry, &path)?;
    Ok(path)
}

/// End-of-session save. Empty registries are skipped silently.
pub fn auto_save(registry: &Registry, dir: &Path) -> Result<Option<PathBuf>> {
    if registry.is_empty() {
        log::debug!("auto-save skipped, registry is empty");
        return Ok(None);
    }
    save_next_day_file(registry, dir).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use tempfile::TempDir;

    fn sample() -> Registry {
        let mut r = Registry::new();
        r.insert("1AAA-000").unwrap();
        r.insert("1BBB-000").unwrap();
        let sel = r.select("1BBB-000").unwrap();
        r.tag(&sel).unwrap();
        r
    }

    #[test]
    fn missing_working_file_is_empty_registry() {
        let dir = TempDir::new().unwrap();
        let r = load_working(&dir.path().join("plates.txt")).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn working_file_round_trips_even_when_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plates.txt");
        write_working(&Registry::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Untagged:\nTagged:\n");
        write_working(&sample(), &path).unwrap();
        assert_eq!(load_working(&path).unwrap(), sample());
    }

    #[test]
    fn malformed_working_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plates.txt");
        fs::write(&path, "garbage\nmore garbage\n").unwrap();
        let err = load_working(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
    }

    #[test]
    fn save_refuses_empty_registry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let err = save_file(&Registry::new(), &path).unwrap_err();
        assert!(matches!(err, Error::Save(SaveError::NothingToSave)));
        assert!(!path.exists());
    }

    #[test]
    fn import_merges_into_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "Untagged:\n1CCC-000\n1AAA-000\nTagged:\n").unwrap();
        let mut r = sample();
        let summary = import_file(&mut r, &path).unwrap();
        assert_eq!(summary.imported(), 1);
        assert!(summary.has_warnings());
        assert_eq!(r.untagged(), ["1AAA-000", "1CCC-000"]);
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = import_file(&mut Registry::new(), &dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn auto_save_picks_next_day_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(auto_save(&Registry::new(), dir.path()).unwrap(), None);
        let first = auto_save(&sample(), dir.path()).unwrap();
        assert_eq!(first, Some(dir.path().join("day_01.txt")));
        let second = auto_save(&sample(), dir.path()).unwrap();
        assert_eq!(second, Some(dir.path().join("day_02.txt")));
        assert_eq!(
            fs::read_to_string(dir.path().join("day_01.txt")).unwrap(),
            "Untagged:\n1AAA-000\nTagged:\n1BBB-000\n"
        );
    }
}
