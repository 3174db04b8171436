use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const GIT_SUFFIX: &str = ".git";
const FALLBACK_NAME: &str = "repository";

/// Name of the chart directory for a repository path.
///
/// The last path component with any `.git` suffix removed, so both
/// `~/src/tool.git` and `~/src/tool/.git` map to `tool`. Paths without a
/// usable final component (`.`, `..`, `/`) are resolved against the
/// filesystem first.
pub fn output_dir_name(repo_path: &Path) -> String {
    if let Some(name) = name_from_components(repo_path) {
        return name;
    }
    repo_path
        .canonicalize()
        .ok()
        .and_then(|resolved| name_from_components(&resolved))
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn name_from_components(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let stem = file_name.strip_suffix(GIT_SUFFIX).unwrap_or(&file_name);
    if !stem.is_empty() {
        return Some(stem.to_string());
    }
    // A bare `.git` directory is named after its parent
    path.parent().and_then(name_from_components)
}

/// Create (if needed) the chart directory for `repo_path` under `base`.
pub fn prepare_output_dir(base: &Path, repo_path: &Path) -> Result<PathBuf> {
    let dir = base.join(output_dir_name(repo_path));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
