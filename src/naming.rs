use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

/// Marker prepended to the filename of every tagged copy.
pub const COPY_PREFIX: &str = "copy_";

/// Helper to convert a Path to &str, returning an error if not valid UTF-8.
pub fn path_to_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("Invalid path (not UTF-8)"))
}

/// Replace every whitespace character with `_` and drop apostrophes.
/// Applying it twice is the same as applying it once.
pub fn trim_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '\'')
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Where the tagged copy of `file` is written: the bare filename prefixed
/// with `copy_`, kept in the file's own directory. In trim mode the whole
/// path string is normalized, matching what cleanup later renames the
/// original to.
pub fn copy_target(file: &Path, trim: bool) -> Result<PathBuf> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("no filename in path {}", file.display()))?;
    let copy_name = format!("{COPY_PREFIX}{name}");

    let target = match file.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.join(copy_name),
        None => PathBuf::from(copy_name),
    };
    if trim {
        Ok(PathBuf::from(trim_name(path_to_str(&target)?)))
    } else {
        Ok(target)
    }
}

/// The name the tagged copy takes over when cleanup replaces the original.
pub fn replacement_target(original: &Path, trim: bool) -> Result<PathBuf> {
    if trim {
        Ok(PathBuf::from(trim_name(path_to_str(original)?)))
    } else {
        Ok(original.to_path_buf())
    }
}
