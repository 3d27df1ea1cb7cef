use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

pub const MANIFEST: &str = "package.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a JSON file.
pub async fn read_json(path: &Path) -> Result<Value, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Blocking variant used by the tree walk, which runs before any per-package
/// work is scheduled.
pub fn read_json_sync(path: &Path) -> Result<Value, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `(name, requested range)` pairs of a manifest's dependency section, in key
/// order. Non-string ranges become `*`.
pub fn dependency_section(manifest: &Value, section: &str) -> Vec<(String, String)> {
    manifest
        .get(section)
        .and_then(|v| v.as_object())
        .map(|deps| {
            deps.iter()
                .map(|(name, range)| (name.clone(), range.as_str().unwrap_or("*").to_string()))
                .collect()
        })
        .unwrap_or_default()
}

pub fn string_field<'a>(manifest: &'a Value, field: &str) -> Option<&'a str> {
    manifest.get(field).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_json() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{ "name": "express", "version": "4.18.2" }}"#).unwrap();
        let json = read_json(f.path()).await.unwrap();
        assert_eq!(string_field(&json, "name"), Some("express"));
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let err = read_json(Path::new("/nonexistent/package.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_json_invalid() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        let err = read_json(f.path()).await.unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse"));
    }

    #[test]
    fn test_dependency_section() {
        let manifest = json!({
            "dependencies": { "lodash": "^4.17.21", "odd": 3 },
            "devDependencies": { "jest": "^29.0.0" }
        });
        assert_eq!(
            dependency_section(&manifest, "dependencies"),
            vec![
                ("lodash".to_string(), "^4.17.21".to_string()),
                ("odd".to_string(), "*".to_string()),
            ]
        );
        assert!(dependency_section(&manifest, "optionalDependencies").is_empty());
    }
}
