use std::path::{Path, PathBuf};

use crate::application::{ApplicationError, ApplicationResult};

/// Directory containing the running executable.
pub fn executable_dir() -> ApplicationResult<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| ApplicationError::Config {
        message: format!("unable to locate current executable: {e}"),
    })?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ApplicationError::Config {
            message: format!("executable has no parent directory: {}", exe.display()),
        })
}

/// Installation directory: the explicit choice, else next to the executable.
pub fn resolve_home(explicit: Option<&Path>) -> ApplicationResult<PathBuf> {
    match explicit {
        Some(home) => Ok(home.to_path_buf()),
        None => executable_dir(),
    }
}
