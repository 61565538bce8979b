//! Obfuscation preset catalog
//!
//! A closed, constant registry of named pipeline configurations. Each preset
//! is an ordered list of step descriptors consumed by the downstream
//! transformation engine; this crate never executes a pipeline, it only
//! guarantees the schema the engine relies on:
//!
//! - `Steps` is always a sequence, possibly empty, never null
//! - `Settings` on every step is always a mapping, possibly empty, never null
//! - step order is the execution order and the same step name may appear
//!   more than once in a single preset
//!
//! Field names are serialized with the exact spelling the host runtime
//! expects (including the historical `Treshold` key).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{LuapackError, Result};

/// One named transformation request within a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Identifier the transformation engine dispatches on
    #[serde(rename = "Name")]
    pub name: String,

    /// Step-specific options; always present, possibly empty
    #[serde(rename = "Settings", default)]
    pub settings: IndexMap<String, Value>,
}

impl Step {
    /// Create a step with no settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: IndexMap::new(),
        }
    }

    /// Create a step with the given settings
    pub fn with_settings(name: impl Into<String>, settings: &[(&str, Value)]) -> Self {
        Self {
            name: name.into(),
            settings: settings
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        }
    }
}

/// A named, immutable pipeline specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "LuaVersion")]
    pub lua_version: String,

    #[serde(rename = "VarNamePrefix")]
    pub var_name_prefix: String,

    #[serde(rename = "NameGenerator")]
    pub name_generator: String,

    #[serde(rename = "PrettyPrint")]
    pub pretty_print: bool,

    #[serde(rename = "Seed")]
    pub seed: u64,

    /// Execution-ordered steps; always present, possibly empty
    #[serde(rename = "Steps", default)]
    pub steps: Vec<Step>,
}

impl Preset {
    /// Preset with the catalog-wide defaults and the given steps
    fn with_steps(steps: Vec<Step>) -> Self {
        Self {
            lua_version: "Lua51".to_string(),
            var_name_prefix: String::new(),
            name_generator: "MangledShuffled".to_string(),
            pretty_print: false,
            seed: 0,
            steps,
        }
    }
}

/// Full `ConstantArray` settings used by the heavier tiers
fn constant_array_full() -> Step {
    Step::with_settings(
        "ConstantArray",
        &[
            ("Treshold", json!(1)),
            ("StringsOnly", json!(true)),
            ("Shuffle", json!(true)),
            ("Rotate", json!(true)),
            ("LocalWrapperTreshold", json!(0)),
        ],
    )
}

/// The fixed preset catalog, keyed by tier name.
///
/// Iteration order is the catalog's declaration order and is part of the
/// emitted artifact.
pub fn catalog() -> IndexMap<String, Preset> {
    let mut presets = IndexMap::new();

    presets.insert("Minify".to_string(), Preset::with_steps(vec![]));

    presets.insert(
        "Weak".to_string(),
        Preset::with_steps(vec![
            Step::new("Vmify"),
            Step::with_settings(
                "ConstantArray",
                &[("Treshold", json!(1)), ("StringsOnly", json!(true))],
            ),
            Step::new("WrapInFunction"),
        ]),
    );

    presets.insert(
        "Medium".to_string(),
        Preset::with_steps(vec![
            Step::new("EncryptStrings"),
            Step::with_settings("AntiTamper", &[("UseDebug", json!(false))]),
            Step::new("Vmify"),
            constant_array_full(),
            Step::new("NumbersToExpressions"),
            Step::new("WrapInFunction"),
        ]),
    );

    // Strong and Maximum both run Vmify twice: once over the original source
    // and once over the already-encrypted result. The duplicate entries are
    // intentional and must survive serialization distinctly.
    let strong = Preset::with_steps(vec![
        Step::new("Vmify"),
        Step::new("EncryptStrings"),
        Step::new("AntiTamper"),
        Step::new("Vmify"),
        constant_array_full(),
        Step::new("NumbersToExpressions"),
        Step::new("WrapInFunction"),
    ]);

    presets.insert("Strong".to_string(), strong.clone());
    presets.insert("Maximum".to_string(), strong);

    presets
}

/// Validate the schema invariants the downstream engine relies on.
///
/// The type system already rules out absent `Steps`/`Settings`; this catches
/// the remaining data-level mistakes (empty names) before they reach an
/// artifact.
pub fn validate(presets: &IndexMap<String, Preset>) -> Result<()> {
    for (name, preset) in presets {
        if name.is_empty() {
            return Err(LuapackError::InvalidPreset {
                name: "<unnamed>".to_string(),
                reason: "preset name must not be empty".to_string(),
            });
        }
        for (position, step) in preset.steps.iter().enumerate() {
            if step.name.is_empty() {
                return Err(LuapackError::InvalidPreset {
                    name: name.clone(),
                    reason: format!("step {position} has an empty name"),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_tiers_in_order() {
        let presets = catalog();
        let names: Vec<_> = presets.keys().map(String::as_str).collect();
        assert_eq!(names, ["Minify", "Weak", "Medium", "Strong", "Maximum"]);
    }

    #[test]
    fn test_catalog_validates() {
        assert!(validate(&catalog()).is_ok());
    }

    #[test]
    fn test_minify_has_empty_steps() {
        let presets = catalog();
        assert!(presets["Minify"].steps.is_empty());
    }

    #[test]
    fn test_weak_step_order() {
        let presets = catalog();
        let names: Vec<_> = presets["Weak"]
            .steps
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Vmify", "ConstantArray", "WrapInFunction"]);
    }

    #[test]
    fn test_strong_runs_vmify_twice() {
        let presets = catalog();
        let names: Vec<_> = presets["Strong"]
            .steps
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names[0], "Vmify");
        assert_eq!(names[3], "Vmify");
        assert_eq!(names.iter().filter(|n| **n == "Vmify").count(), 2);
    }

    #[test]
    fn test_settings_always_present_in_json() {
        let presets = catalog();
        let value = serde_json::to_value(&presets["Strong"]).unwrap();

        for step in value["Steps"].as_array().unwrap() {
            assert!(step["Settings"].is_object());
        }
    }

    #[test]
    fn test_minify_steps_serialized_as_empty_array() {
        let presets = catalog();
        let value = serde_json::to_value(&presets["Minify"]).unwrap();
        assert_eq!(value["Steps"], serde_json::json!([]));
    }

    #[test]
    fn test_settings_value_types_preserved() {
        let presets = catalog();
        let value = serde_json::to_value(&presets["Medium"]).unwrap();
        let steps = value["Steps"].as_array().unwrap();

        // AntiTamper carries a real boolean, ConstantArray real numbers
        assert_eq!(steps[1]["Settings"]["UseDebug"], serde_json::json!(false));
        assert_eq!(steps[3]["Settings"]["Treshold"], serde_json::json!(1));
        assert_eq!(
            steps[3]["Settings"]["LocalWrapperTreshold"],
            serde_json::json!(0)
        );
        assert!(value["PrettyPrint"].is_boolean());
        assert!(value["Seed"].is_number());
    }

    #[test]
    fn test_preset_round_trip() {
        let presets = catalog();
        let json = serde_json::to_string(&presets).unwrap();
        let back: IndexMap<String, Preset> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, presets);
    }

    #[test]
    fn test_validate_rejects_empty_step_name() {
        let mut presets = catalog();
        presets
            .get_mut("Weak")
            .unwrap()
            .steps
            .push(Step::new(""));

        let err = validate(&presets).unwrap_err();
        assert!(matches!(err, LuapackError::InvalidPreset { .. }));
        assert!(err.to_string().contains("Weak"));
    }
}
