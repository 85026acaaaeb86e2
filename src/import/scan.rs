use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ImportSettings;

use super::BatchFormat;

fn is_batch_file(path: &Path, settings: &ImportSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    BatchFormat::from_path(path).is_some()
        && path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                exts.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List importable batch files under `dir`, sorted by file name
/// (case-insensitive). A missing directory yields an empty list.
pub fn list_batches(dir: &Path, settings: &ImportSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut batches: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_batch_file(p, settings))
        .collect();

    batches.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    batches
}
