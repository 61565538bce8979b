//! Error types and handling for luapack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every error is fatal to the current invocation: bundling is a one-shot
//! build step and the operator re-runs it after fixing the cause.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for luapack operations
#[derive(Error, Diagnostic, Debug)]
pub enum LuapackError {
    // Discovery errors
    #[error("Source root not found: {path}")]
    #[diagnostic(
        code(luapack::discovery::root_not_found),
        help("Check that the path exists and is a directory")
    )]
    RootNotFound { path: String },

    #[error("Failed to read module file: {path}")]
    #[diagnostic(code(luapack::discovery::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Module name '{name}' derived from two different files")]
    #[diagnostic(
        code(luapack::discovery::name_collision),
        help("Rename one of the files; both '{first}' and '{second}' map to the same module name")
    )]
    ModuleNameCollision {
        name: String,
        first: String,
        second: String,
    },

    // Preset catalog errors
    #[error("Invalid preset '{name}': {reason}")]
    #[diagnostic(code(luapack::presets::invalid))]
    InvalidPreset { name: String, reason: String },

    // Emission errors
    #[error("Failed to serialize bundle: {reason}")]
    #[diagnostic(code(luapack::emit::serialize_failed))]
    SerializeFailed { reason: String },

    #[error("Failed to write artifact: {path}")]
    #[diagnostic(
        code(luapack::emit::write_failed),
        help("Check that the destination directory exists and is writable")
    )]
    FileWriteFailed { path: String, reason: String },

    // Server errors
    #[error("Failed to bind {addr}: {reason}")]
    #[diagnostic(
        code(luapack::serve::bind_failed),
        help("The port may already be in use; pick another with --port")
    )]
    BindFailed { addr: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(luapack::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for LuapackError {
    fn from(err: std::io::Error) -> Self {
        LuapackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LuapackError {
    fn from(err: serde_json::Error) -> Self {
        LuapackError::SerializeFailed {
            reason: err.to_string(),
        }
    }
}

/// Creates a discovery read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> LuapackError {
    LuapackError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an artifact write error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> LuapackError {
    LuapackError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LuapackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LuapackError::RootNotFound {
            path: "missing/src".to_string(),
        };
        assert_eq!(err.to_string(), "Source root not found: missing/src");
    }

    #[test]
    fn test_error_code() {
        let err = LuapackError::ModuleNameCollision {
            name: "a.b".to_string(),
            first: "a/b.lua".to_string(),
            second: "a\\b.lua".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("luapack::discovery::name_collision".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LuapackError = io_err.into();
        assert!(matches!(err, LuapackError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let err: LuapackError = parse_result.unwrap_err().into();
        assert!(matches!(err, LuapackError::SerializeFailed { .. }));
    }

    #[test]
    fn test_read_failed_constructor() {
        let err = read_failed("src/init.lua", "permission denied");
        assert!(matches!(err, LuapackError::FileReadFailed { .. }));
        assert!(err.to_string().contains("Failed to read module file"));
    }

    #[test]
    fn test_write_failed_constructor() {
        let err = write_failed("lua-bundle.js", "disk full");
        assert!(matches!(err, LuapackError::FileWriteFailed { .. }));
        assert!(err.to_string().contains("Failed to write artifact"));
    }

    #[test]
    fn test_collision_names_both_paths() {
        let err = LuapackError::ModuleNameCollision {
            name: "util".to_string(),
            first: "util.lua".to_string(),
            second: "util/init.lua".to_string(),
        };
        assert!(err.to_string().contains("util"));
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("util.lua"));
        assert!(help.contains("util/init.lua"));
    }
}
