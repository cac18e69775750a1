//! Executable discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::ExecutableLocator;

/// Looks in explicit directories first, then on the process search path.
///
/// The process environment is only read, never modified.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    extra_dirs: Vec<PathBuf>,
    system_path: bool,
}

impl Default for SearchPathLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPathLocator {
    pub fn new() -> Self {
        Self {
            extra_dirs: Vec::new(),
            system_path: true,
        }
    }

    /// Add a directory. Directories are searched in the order added, all
    /// before the system path.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    /// Only search the explicit directories.
    pub fn without_system_path(mut self) -> Self {
        self.system_path = false;
        self
    }
}

impl ExecutableLocator for SearchPathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let file_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);

        for dir in &self.extra_dirs {
            let candidate = dir.join(&file_name);
            if is_executable(&candidate) {
                debug!(path = %candidate.display(), "Found {} in extra dir", name);
                return Some(candidate);
            }
        }

        if !self.system_path {
            return None;
        }

        match which::which(name) {
            Ok(path) => {
                debug!(path = %path.display(), "Found {} on PATH", name);
                Some(path)
            }
            Err(e) => {
                debug!(error = %e, "{} not on PATH", name);
                None
            }
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
