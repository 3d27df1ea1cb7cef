use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use super::manifest::{dependency_section, read_json_sync, string_field, MANIFEST};
use crate::models::DependencyEntry;

/// Walks an installed `node_modules` tree starting from the project's
/// production dependencies.
pub struct NodeAnalyzer;

impl NodeAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for NodeAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<DependencyEntry>> {
        let manifest_path = path.join(MANIFEST);
        let manifest = read_json_sync(&manifest_path)
            .with_context(|| format!("{} is not a Node project", path.display()))?;

        let mut walk = TreeWalk {
            root: path.to_path_buf(),
            visited: HashSet::new(),
            unresolved: HashSet::new(),
            entries: Vec::new(),
        };
        walk.visit(path, &manifest);

        tracing::debug!(
            "resolved {} packages under {}",
            walk.entries.len(),
            path.display()
        );
        Ok(walk.entries)
    }
}

struct TreeWalk {
    root: PathBuf,
    visited: HashSet<PathBuf>,
    unresolved: HashSet<String>,
    entries: Vec<DependencyEntry>,
}

impl TreeWalk {
    fn visit(&mut self, dir: &Path, manifest: &Value) {
        for (name, range, optional) in production_dependencies(manifest) {
            let Some(install_dir) = self.resolve(dir, &name) else {
                let id = format!("{}@{}", name, range);
                if self.unresolved.insert(id.clone()) {
                    self.entries.push(DependencyEntry {
                        path: dir.join("node_modules").join(&name),
                        name,
                        id,
                        missing: true,
                        optional,
                    });
                }
                continue;
            };

            if !self.visited.insert(install_dir.clone()) {
                continue;
            }

            match read_json_sync(&install_dir.join(MANIFEST)) {
                Ok(child) => {
                    let version = string_field(&child, "version").unwrap_or("*");
                    self.entries.push(DependencyEntry {
                        id: format!("{}@{}", name, version),
                        name,
                        path: install_dir.clone(),
                        missing: false,
                        optional,
                    });
                    self.visit(&install_dir, &child);
                }
                Err(err) => {
                    // The scanner reads the manifest again and degrades the
                    // package to `missing`.
                    tracing::debug!("{}", err);
                    self.entries.push(DependencyEntry {
                        id: format!("{}@{}", name, range),
                        name,
                        path: install_dir,
                        missing: false,
                        optional,
                    });
                }
            }
        }
    }

    /// Node's lookup rule: `<dir>/node_modules/<name>`, then the same in each
    /// ancestor up to the project root. Directories that are themselves named
    /// `node_modules` are skipped.
    fn resolve(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        for ancestor in dir.ancestors() {
            if ancestor.file_name().is_some_and(|n| n == "node_modules") {
                continue;
            }
            let candidate = ancestor.join("node_modules").join(name);
            if candidate.is_dir() {
                return Some(candidate);
            }
            if ancestor == self.root {
                break;
            }
        }
        None
    }
}

/// `dependencies` followed by `optionalDependencies`; a name listed in both
/// keeps its first position and is marked optional.
fn production_dependencies(manifest: &Value) -> Vec<(String, String, bool)> {
    let mut deps: Vec<(String, String, bool)> = dependency_section(manifest, "dependencies")
        .into_iter()
        .map(|(name, range)| (name, range, false))
        .collect();

    for (name, range) in dependency_section(manifest, "optionalDependencies") {
        match deps.iter_mut().find(|(n, _, _)| *n == name) {
            Some(existing) => {
                existing.1 = range;
                existing.2 = true;
            }
            None => deps.push((name, range, true)),
        }
    }

    deps
}
