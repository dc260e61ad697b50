// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::data::{DataKind, Datasets, PageResult};

/// Write everything in `sets` according to `export`.
/// JSON: one file holding the whole object. CSV/TSV: one file per present set.
/// Returns the paths written, in order.
pub fn export_datasets(
    export: &ExportOptions,
    sets: &Datasets,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    ensure_directory(&export.out_path.dir)?;

    let Some(delim) = export.format.delim() else {
        let path = export.json_path();
        let json = serde_json::to_string_pretty(sets)?;
        fs::write(&path, json)?;
        return Ok(vec![path]);
    };

    let mut written = Vec::new();
    for (kind, result) in sets.iter() {
        let path = export.table_path(kind.name());
        let contents = to_export_string(kind, result, export.include_headers, delim)?;
        fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}

/// Single result set: `<stem>.json`, or `<stem>_<kind>.<ext>` for CSV/TSV.
pub fn export_result(
    export: &ExportOptions,
    kind: DataKind,
    result: &PageResult,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    ensure_directory(&export.out_path.dir)?;

    let (path, contents) = match export.format.delim() {
        None => (export.json_path(), serde_json::to_string_pretty(result)?),
        Some(delim) => (
            export.table_path(kind.name()),
            to_export_string(kind, result, export.include_headers, delim)?,
        ),
    };
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.as_os_str().is_empty() { return Ok(()); }
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}
