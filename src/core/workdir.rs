//! The application directory and the process working directory.
//!
//! Paths are made absolute but not canonicalized: children see the same
//! directory spelling the user would get from `cd`, never a `\\?\` verbatim path.

use std::path::{Path, PathBuf};

use crate::utils::error::{Error, Result};

/// Directory holding the running launcher executable.
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::new(&format!("{} has no parent directory", exe.display())))
}

/// The directory the application lives in: `base_dir` when configured,
/// otherwise the launcher's own directory.
pub fn resolve(base_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match base_dir {
        Some(dir) => std::path::absolute(dir)
            .map_err(|e| Error::new(&format!("{}: {}", dir.display(), e)))?,
        None => launcher_dir()?,
    };

    if !dir.is_dir() {
        return Err(Error::new(&format!("{} is not a directory", dir.display())));
    }

    Ok(dir)
}

/// Make `dir` the process working directory.
pub fn enter(dir: &Path) -> Result<()> {
    std::env::set_current_dir(dir)
        .map_err(|e| Error::new(&format!("{}: {}", dir.display(), e)))?;
    debug!("working directory is now {}", dir.display());

    Ok(())
}
