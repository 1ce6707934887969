use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SCRATCH_ID: AtomicUsize = AtomicUsize::new(0);

/// Temporary directory for tests that need real files. Each instance gets a
/// unique path and removes itself on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> Self {
        let id = NEXT_SCRATCH_ID.fetch_add(1, Ordering::SeqCst);
        let path = env::temp_dir().join(format!("tag_stamper_{}_{}", std::process::id(), id));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty file with the given name inside the directory.
    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        File::create(&path).unwrap();
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
