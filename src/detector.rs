use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::license::signatures::identify;

static LICENSE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)licen[cs]e").expect("valid license file pattern"));

/// Top-level regular files of `dir`, sorted by name. Unreadable directories
/// yield an empty list.
pub async fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return files;
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            files.push(path);
        }
    }

    files.sort();
    files
}

fn is_license_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| LICENSE_FILE_RE.is_match(n))
}

/// Detect a package's license from the license file in its root directory.
///
/// Returns at most one identifier. A missing, unreadable, non-UTF-8 or
/// unrecognized file yields an empty list.
pub async fn detect_license_file(package_dir: &Path) -> Vec<String> {
    let Some(file) = list_files(package_dir)
        .await
        .into_iter()
        .find(|p| is_license_file(p))
    else {
        return Vec::new();
    };

    match tokio::fs::read_to_string(&file).await {
        Ok(text) => identify(&text).map(str::to_string).into_iter().collect(),
        Err(err) => {
            tracing::debug!("could not read {}: {}", file.display(), err);
            Vec::new()
        }
    }
}
