//! Auto-naming for saves: `day_01.txt` … `day_99.txt`, then `day_100.txt` on.

use std::io;
use std::path::{Path, PathBuf};

/// File name for day `n`: two-digit zero padding up to 99, unpadded beyond.
pub fn day_file_name(n: u32) -> String {
    format!("day_{n:02}.txt")
}

/// First `day_N.txt` in `dir` that does not exist yet, probing from 1.
pub fn next_day_file(dir: &Path) -> io::Result<PathBuf> {
    next_day_file_from(dir, 1)
}

fn next_day_file_from(dir: &Path, start: u32) -> io::Result<PathBuf> {
    let mut n = start;
    loop {
        let path = dir.join(day_file_name(n));
        if !path.exists() {
            return Ok(path);
        }
        n = n.checked_add(1).ok_or_else(|| {
            io::Error::other(format!("no free day file left in {}", dir.display()))
        })?;
    }
}
