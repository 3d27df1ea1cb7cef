use std::collections::BTreeSet;
use std::path::PathBuf;

/// Reserved identifier for packages whose manifest could not be read.
pub const MISSING: &str = "missing";

/// One installed (or expected) dependency, as produced by an analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEntry {
    pub name: String,
    /// `name@version` once installed, `name@range` when it could not be resolved.
    pub id: String,
    pub path: PathBuf,
    pub missing: bool,
    /// Declared under `optionalDependencies` by whoever pulled it in.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub id: String,
    pub path: PathBuf,
    pub missing: bool,
    pub declared_licenses: Vec<String>,
    pub file_licenses: Vec<String>,
    pub all_licenses: Vec<String>,
}

impl PackageRecord {
    /// Record for a dependency that has no readable manifest.
    pub fn missing(entry: &DependencyEntry) -> Self {
        Self {
            name: entry.name.clone(),
            version: String::new(),
            id: entry.id.clone(),
            path: entry.path.clone(),
            missing: true,
            declared_licenses: Vec::new(),
            file_licenses: Vec::new(),
            all_licenses: vec![MISSING.to_string()],
        }
    }

    pub fn new(
        entry: &DependencyEntry,
        name: String,
        version: String,
        declared_licenses: Vec<String>,
        file_licenses: Vec<String>,
    ) -> Self {
        let id = format!("{}@{}", name, version);
        let all_licenses = merge_licenses(&declared_licenses, &file_licenses);
        Self {
            name,
            version,
            id,
            path: entry.path.clone(),
            missing: false,
            declared_licenses,
            file_licenses,
            all_licenses,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }
}

/// Sorted, deduplicated union of declared and file-detected identifiers.
pub fn merge_licenses(declared: &[String], detected: &[String]) -> Vec<String> {
    declared
        .iter()
        .chain(detected)
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
