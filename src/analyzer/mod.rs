use std::path::Path;

use anyhow::Result;

use crate::models::DependencyEntry;

pub mod manifest;
pub mod node;

/// Enumerates the installed dependencies of a project.
pub trait Analyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<DependencyEntry>>;
}
