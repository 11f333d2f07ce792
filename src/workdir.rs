//! Working-directory collaborator

use std::io;
use std::path::PathBuf;

/// Source of the current working root, queried once per poll tick.
pub trait WorkdirSource: Send + Sync {
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// Reads the process working directory from the environment.
#[derive(Debug, Default)]
pub struct EnvWorkdir;

impl WorkdirSource for EnvWorkdir {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}
