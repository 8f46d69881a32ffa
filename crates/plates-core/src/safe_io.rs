//! Atomic file writes.
//!
//! Contents go to a sibling `<name>.tmp` file, are synced, then renamed over
//! the target. The target is either fully updated or unchanged.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Atomically write bytes to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written, synced,
/// or renamed.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = tmp_path_for(path);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)?;

    {
        let mut writer = BufWriter::new(&mut file);
        writer.write_all(contents)?;
        writer.flush()?;
    }

    // sync before rename
    file.sync_all()?;
    fs::rename(&tmp_path, path)
}

/// Atomically write text to `path`.
pub fn atomic_write_text(path: &Path, text: &str) -> io::Result<()> {
    atomic_write(path, text.as_bytes())
}

// `day_01.txt` -> `day_01.txt.tmp`, so a temp file never shadows a real one.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("plates"));
    name.push(".tmp");
    path.with_file_name(name)
}
