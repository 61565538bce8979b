//! Bundle artifact emission
//!
//! Renders the collected modules and the preset catalog into a single
//! JavaScript file the host runtime loads at startup:
//!
//! ```js
//! const LUA_MODULES = { "module.name": "source text", ... };
//! const PRESETS = { "Weak": { ... }, ... };
//! ```
//!
//! The two constant names and their shapes are a compatibility contract with
//! downstream consumers and must not change.

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, write_failed};
use crate::presets::{self, Preset};

/// Top-level constant holding the module mapping
pub const MODULES_CONST: &str = "LUA_MODULES";

/// Top-level constant holding the preset catalog
pub const PRESETS_CONST: &str = "PRESETS";

/// Render the artifact text.
///
/// Serialization goes through JSON so embedded quotes, backslashes and
/// control characters in module sources survive unchanged, and preset
/// booleans/numbers keep their types. Object key order is the map's
/// insertion order.
pub fn render(
    modules: &IndexMap<String, String>,
    presets: &IndexMap<String, Preset>,
) -> Result<String> {
    let modules_json = serde_json::to_string_pretty(modules)?;
    let presets_json = serde_json::to_string_pretty(presets)?;

    Ok(format!(
        "// Auto-generated Lua module bundle. Do not edit by hand.\n\
         const {MODULES_CONST} = {modules_json};\n\
         \n\
         const {PRESETS_CONST} = {presets_json};\n"
    ))
}

/// Write the artifact to `dest`, replacing any existing file.
///
/// The catalog is validated first so a malformed preset can never reach an
/// artifact. The write goes to a temporary file in the destination's
/// directory followed by an atomic rename, so a concurrently running
/// consumer (e.g. a dev server reloading the page) never observes a
/// partially written bundle.
pub fn emit(
    modules: &IndexMap<String, String>,
    presets: &IndexMap<String, Preset>,
    dest: &Path,
) -> Result<()> {
    presets::validate(presets)?;
    let content = render(modules, presets)?;

    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| write_failed(dir.display().to_string(), e.to_string()))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| write_failed(dest.display().to_string(), e.to_string()))?;

    tmp.persist(dest)
        .map_err(|e| write_failed(dest.display().to_string(), e.to_string()))?;

    Ok(())
}

/// Module names in lexicographic order, for the operator manifest.
///
/// Sorting is a reporting nicety only; the artifact keeps the mapping's
/// insertion order.
pub fn sorted_names(modules: &IndexMap<String, String>) -> Vec<String> {
    let mut names: Vec<String> = modules.keys().cloned().collect();
    names.sort();
    names
}
