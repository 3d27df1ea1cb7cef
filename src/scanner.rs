use futures::future::join_all;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::analyzer::manifest::{read_json, string_field, MANIFEST};
use crate::detector::detect_license_file;
use crate::license::spdx::{normalize, DeclaredLicense};
use crate::models::{DependencyEntry, PackageRecord};

/// Inspect every package concurrently and return the records in input order.
pub async fn scan(entries: &[DependencyEntry], progress: bool) -> Vec<PackageRecord> {
    let pb = if progress {
        let pb = ProgressBar::with_draw_target(
            Some(entries.len() as u64),
            ProgressDrawTarget::stderr(),
        );
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let records = join_all(entries.iter().map(|entry| {
        let pb = pb.clone();
        async move {
            let record = inspect(entry).await;
            pb.inc(1);
            record
        }
    }))
    .await;

    pb.finish_and_clear();
    records
}

/// Build the record for one package.
///
/// The manifest read and the license-file scan run concurrently. An
/// unreadable manifest degrades the package to `missing`, discarding whatever
/// the license file said.
pub async fn inspect(entry: &DependencyEntry) -> PackageRecord {
    if entry.missing {
        tracing::debug!(optional = entry.optional, "{} is not installed", entry.id);
        return PackageRecord::missing(entry);
    }

    let manifest_path = entry.path.join(MANIFEST);
    let (manifest, file_licenses) = tokio::join!(
        read_json(&manifest_path),
        detect_license_file(&entry.path)
    );

    let manifest = match manifest {
        Ok(manifest) => manifest,
        Err(err) => {
            tracing::debug!("{}: {:?}", entry.id, err);
            return PackageRecord::missing(entry);
        }
    };

    let name = string_field(&manifest, "name")
        .unwrap_or(&entry.name)
        .to_string();
    let version = string_field(&manifest, "version").unwrap_or("*").to_string();
    let declared = normalize(&DeclaredLicense::from_manifest(&manifest));

    let record = PackageRecord::new(entry, name, version, declared, file_licenses);
    tracing::debug!(
        name = %record.name,
        version = %record.version,
        path = %record.path.display(),
        declared = ?record.declared_licenses,
        file = ?record.file_licenses,
        "{}: {}",
        record.id,
        record.all_licenses.join(" + ")
    );
    record
}
