// File ingestion — turns paths on disk into `SourceText` inputs.
//
// A path may be a single file or a folder. Folders contribute the regular
// files directly inside them (not recursively), in name order. Unless an
// author is given explicitly, a file's author is the name of the folder it
// sits in, so a corpus laid out as `corpus/<author>/<work>.txt` needs no
// extra metadata.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::corpus::session::SourceText;

/// Sources that were read, plus every path, folder entry or file that could
/// not be.
#[derive(Debug, Default)]
pub struct Collected {
    pub sources: Vec<SourceText>,
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

/// Read one file into a source.
///
/// The document name is `<folder>/<file>`, so works with the same file name
/// under different author folders stay distinct. A file with no parent
/// folder is named by its file name alone.
pub fn read_source(path: &Path, author: Option<&str>) -> Result<SourceText> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let folder = parent_folder(path);
    let name = match folder {
        Some(folder) => format!("{folder}/{file_name}"),
        None => file_name.to_string(),
    };
    let author = match author {
        Some(a) => a.to_string(),
        None => folder.unwrap_or("unknown").to_string(),
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(SourceText { name, author, text })
}

fn parent_folder(path: &Path) -> Option<&str> {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
}

/// Expand folders into their files, sorted, leaving plain files as given.
///
/// A path that cannot be inspected, a folder that cannot be listed, or a
/// folder entry that cannot be read is returned as a failure; the remaining
/// paths are still expanded.
pub fn expand_paths(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<(PathBuf, anyhow::Error)>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        let metadata = match fs::metadata(path)
            .with_context(|| format!("Failed to inspect {}", path.display()))
        {
            Ok(metadata) => metadata,
            Err(e) => {
                failures.push((path.clone(), e));
                continue;
            }
        };
        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let entries = match fs::read_dir(path)
            .with_context(|| format!("Failed to list folder {}", path.display()))
        {
            Ok(entries) => entries,
            Err(e) => {
                failures.push((path.clone(), e));
                continue;
            }
        };
        let mut listed = Vec::new();
        for entry in entries {
            match entry.with_context(|| format!("Failed to read an entry of {}", path.display())) {
                Ok(entry) => {
                    let file = entry.path();
                    if file.is_file() {
                        listed.push(file);
                    }
                }
                Err(e) => failures.push((path.clone(), e)),
            }
        }
        listed.sort();
        files.extend(listed);
    }
    (files, failures)
}

/// Read every file under `paths`. Paths, folders and files that fail are
/// collected as failures and the rest are still read.
pub fn collect_sources(paths: &[PathBuf], author: Option<&str>) -> Collected {
    let (files, failures) = expand_paths(paths);
    for (path, e) in &failures {
        warn!(path = %path.display(), error = %e, "Failed to expand path, skipping");
    }
    let mut collected = Collected {
        sources: Vec::with_capacity(files.len()),
        failures,
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Reading [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for file in files {
        match read_source(&file, author) {
            Ok(source) => collected.sources.push(source),
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Failed to read file, skipping");
                collected.failures.push((file, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    collected
}
