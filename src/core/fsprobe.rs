//! Filesystem probe - existence checks and directory creation
//!
//! Pure boolean/void helpers. "Not found" is an answer here, not an error.

use std::fs::DirBuilder;
use std::io;
use std::path::Path;

/// Check if a path exists and is a regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Check if a path exists and is a directory.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Create a directory (and parents) if it does not exist.
///
/// New directories are owner-only (0700) on Unix.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path)
}
