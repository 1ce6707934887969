use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    GlobPattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("No files matching `{0}`")]
    NoFiles(String),
    #[error("No cover image matching `{0}`")]
    NoCover(String),
}

fn expand(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    // Only the caller's pattern is interpreted; the directory is literal.
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.display().to_string()),
        pattern
    );
    Ok(glob::glob(&full_pattern)?.collect::<Result<Vec<_>, _>>()?)
}

/// Resolve the filename specifier inside `dir` to the list of target files.
///
/// A specifier containing `*` is expanded with glob (matches come back in
/// alphabetical order); anything else is taken as a literal filename without
/// checking that it exists, so a typo shows up as that file's ffmpeg failure.
pub fn resolve_targets(dir: &Path, filename: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !filename.contains('*') {
        return Ok(vec![dir.join(filename)]);
    }
    let files = expand(dir, filename)?;
    if files.is_empty() {
        return Err(DiscoveryError::NoFiles(format!(
            "{}/{}",
            dir.display(),
            filename
        )));
    }
    Ok(files)
}

/// Resolve the cover image pattern inside `dir` to its first match.
pub fn resolve_cover(dir: &Path, pattern: &str) -> Result<PathBuf, DiscoveryError> {
    expand(dir, pattern)?
        .into_iter()
        .next()
        .ok_or_else(|| DiscoveryError::NoCover(format!("{}/{}", dir.display(), pattern)))
}
