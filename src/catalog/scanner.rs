use std::path::Path;

use anyhow::{Context, Result};

use super::model::{ExampleGroup, FileEntry};
use super::tables::{CatalogConfig, ExampleSpec};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Scan `base` for the configured example folders and build the page catalog.
///
/// * Folders that do not exist are skipped.
/// * Only files with a recognized audio extension are kept.
/// * Files are ordered by label rank, then by filename.
/// * Folders without any audio file produce no group.
/// * Groups are returned sorted by name.
///
/// Only I/O failures on an existing folder are errors.
pub fn build_catalog(base: &Path, cfg: &CatalogConfig) -> Result<Vec<ExampleGroup>> {
    let root = match base.canonicalize() {
        Ok(root) => root,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Base directory {} does not exist", base.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("resolving {}", base.display())),
    };
    let mut groups = Vec::with_capacity(cfg.examples.len());

    for example in &cfg.examples {
        let dir = root.join(&example.name);
        if !dir.is_dir() {
            log::debug!("Skipping {}: no such directory", dir.display());
            continue;
        }

        let files = scan_example(&root, &dir, example, cfg)
            .with_context(|| format!("scanning {}", dir.display()))?;

        if files.is_empty() {
            log::debug!("Skipping {}: no audio files", example.name);
            continue;
        }

        let group = ExampleGroup {
            name: example.name.clone(),
            snr: example.snr.clone(),
            files,
        };
        log::debug!("{} ({}): {:?}", group.name, group.snr, group.labels());
        groups.push(group);
    }

    groups.sort_by(|a, b| a.name.cmp(&b.name));

    log::debug!(
        "Catalog built: {} groups, {} files",
        groups.len(),
        groups.iter().map(|g| g.files.len()).sum::<usize>()
    );
    Ok(groups)
}

// ---------------------------------------------------------------------------
// Per-folder scan
// ---------------------------------------------------------------------------

fn scan_example(
    root: &Path,
    dir: &Path,
    example: &ExampleSpec,
    cfg: &CatalogConfig,
) -> Result<Vec<FileEntry>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).context("listing directory")? {
        let entry = entry.context("reading directory entry")?;
        let path = entry.path();
        if !path.is_file() || !cfg.is_audio(&path) {
            continue;
        }
        if !stays_inside(root, &path) {
            log::debug!("Skipping {}: resolves outside {}", path.display(), root.display());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non UTF-8 filename {raw:?} in {}", dir.display()),
        }
    }
    names.sort();

    let mut files: Vec<FileEntry> = names
        .into_iter()
        .map(|file_name| {
            let stem = Path::new(&file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name.as_str());
            let label = cfg.label_for(&file_name, stem);
            let rel_path = format!("{}/{}", example.name, file_name);
            FileEntry {
                file_name,
                label,
                rel_path,
            }
        })
        .collect();

    // Stable: equal ranks keep filename order.
    files.sort_by_key(|f| cfg.priority(&f.label));
    Ok(files)
}

/// Whether `path`, with symlinks followed, still lives under `root`.
/// The audio endpoint refuses anything else, so such files are not listed.
fn stays_inside(root: &Path, path: &Path) -> bool {
    path.canonicalize()
        .map(|p| p.starts_with(root))
        .unwrap_or(false)
}
