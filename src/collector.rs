//! Module discovery
//!
//! Walks a source tree and produces a mapping from derived module name to
//! verbatim file content. Discovered paths are sorted before reading so the
//! mapping's insertion order is reproducible across platforms and repeated
//! runs regardless of filesystem walk order.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::error::{LuapackError, Result, read_failed};

/// Default source suffix recognized by the collector
pub const DEFAULT_SUFFIX: &str = ".lua";

/// Derive a module name from a root-relative path.
///
/// Both separator conventions are collapsed to `.` and the source suffix is
/// stripped, so the same logical path yields the same name on any host OS.
/// Pure function of the relative path; walk order never enters into it.
pub fn module_name(relative_path: &str, suffix: &str) -> String {
    let dotted = relative_path.replace(['/', '\\'], ".");
    dotted
        .strip_suffix(suffix)
        .map(str::to_string)
        .unwrap_or(dotted)
}

/// Collect every module under `root` whose file name ends in `suffix`.
///
/// Returns the name-to-content mapping in sorted-path insertion order.
/// A single unreadable or non-UTF-8 file aborts the whole collection; two
/// distinct files deriving the same module name are a hard error rather
/// than a silent overwrite.
pub fn collect(root: &Path, suffix: &str) -> Result<IndexMap<String, String>> {
    if !root.is_dir() {
        return Err(LuapackError::RootNotFound {
            path: root.display().to_string(),
        });
    }

    let mut sources: Vec<(String, std::path::PathBuf)> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| read_failed(root.display().to_string(), e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        sources.push((relative, entry.path().to_path_buf()));
    }

    // Sort by relative path for deterministic insertion order
    sources.sort_by(|a, b| a.0.cmp(&b.0));

    let mut modules = IndexMap::with_capacity(sources.len());
    let mut origins: IndexMap<String, String> = IndexMap::with_capacity(sources.len());

    for (relative, path) in sources {
        let name = module_name(&relative, suffix);

        if let Some(first) = origins.get(&name) {
            return Err(LuapackError::ModuleNameCollision {
                name,
                first: first.clone(),
                second: relative,
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| read_failed(path.display().to_string(), e.to_string()))?;

        origins.insert(name.clone(), relative);
        modules.insert(name, content);
    }

    Ok(modules)
}
