//! Migration parameters.
//!
//! Parameters arrive as flat string maps (one per method invocation) and
//! are parsed into a typed struct per migrator. The recognized keys are
//! part of each migrator's contract; keys nobody recognizes are reported
//! back so the dispatcher can flag them in the migration log instead of
//! silently ignoring them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat string-keyed parameter map attached to a method invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamMap(BTreeMap<String, String>);

impl ParamMap {
    pub fn new() -> Self {
        ParamMap::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the key holds the literal "yes", compared case-insensitively.
    pub fn is_yes(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("yes"))
    }

    /// Non-empty value for a key, if any.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    fn parse_i32(&self, key: &str) -> Option<i32> {
        self.non_empty(key).and_then(|v| v.parse().ok())
    }

    /// Keys present in the map but not in `recognized`.
    fn unknown_keys(&self, recognized: &[&str]) -> Vec<String> {
        self.0
            .keys()
            .filter(|k| !recognized.contains(&k.as_str()))
            .cloned()
            .collect()
    }
}

/// Explicit target-name override; always wins over the identifier policy.
pub fn target_name(params: &ParamMap) -> Option<String> {
    params.non_empty("targetName").map(str::to_string)
}

/// Pick the target name: explicit override or the computed identifier.
pub fn resolve_target_name(params: &ParamMap, computed: String) -> String {
    target_name(params).unwrap_or(computed)
}

/// Parameters understood by schema migrators.
#[derive(Debug, Clone, Default)]
pub struct SchemaParams {
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl SchemaParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = SchemaParams {
            charset: params.non_empty("charset").map(str::to_string),
            collation: params.non_empty("collation").map(str::to_string),
        };
        let unknown = params.unknown_keys(&["charset", "collation", "targetName"]);
        (parsed, unknown)
    }
}

/// Parameters understood by table migrators.
#[derive(Debug, Clone, Default)]
pub struct TableParams {
    pub engine: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub add_autoincrement: bool,
}

impl TableParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = TableParams {
            engine: params.non_empty("engine").map(str::to_string),
            charset: params.non_empty("charset").map(str::to_string),
            collation: params.non_empty("collation").map(str::to_string),
            add_autoincrement: params.is_yes("addAutoincrement"),
        };
        let unknown = params.unknown_keys(&[
            "engine",
            "charset",
            "collation",
            "addAutoincrement",
            "targetName",
        ]);
        (parsed, unknown)
    }
}

/// Parameters understood by column migrators.
///
/// A forced datatype short-circuits all dialect type inference. The
/// length/precision overrides only apply when their companion force flag
/// is set to "yes" and the value parses; scale rides along with a forced
/// precision.
#[derive(Debug, Clone, Default)]
pub struct ColumnParams {
    pub force_datatype_name: Option<String>,
    pub force_length: Option<i32>,
    pub force_precision: Option<i32>,
    pub force_scale: Option<i32>,
    pub auto_decimal_digits: bool,
}

impl ColumnParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let mut parsed = ColumnParams {
            force_datatype_name: params.non_empty("forceDatatypeName").map(str::to_string),
            auto_decimal_digits: params.is_yes("autoDecimalDigits"),
            ..ColumnParams::default()
        };

        if params.is_yes("forceLength") {
            parsed.force_length = params.parse_i32("forceLengthValue");
        }
        if params.is_yes("forceDecimalDigits") {
            parsed.force_precision = params.parse_i32("forcePrecisionValue");
            if parsed.force_precision.is_some() {
                parsed.force_scale = params.parse_i32("forceScaleValue");
            }
        }

        let unknown = params.unknown_keys(&[
            "forceDatatypeName",
            "forceLength",
            "forceLengthValue",
            "forceDecimalDigits",
            "forceScaleValue",
            "forcePrecisionValue",
            "autoDecimalDigits",
            "targetName",
        ]);
        (parsed, unknown)
    }
}

/// Parameters understood by index migrators.
#[derive(Debug, Clone, Default)]
pub struct IndexParams {
    /// Overrides every per-column index length when positive.
    pub forced_index_length: i32,
}

impl IndexParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = IndexParams {
            forced_index_length: params.parse_i32("forcedIndexLength").unwrap_or(0),
        };
        let unknown = params.unknown_keys(&["forcedIndexLength", "targetName"]);
        (parsed, unknown)
    }
}

/// Parameters understood by foreign-key migrators.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyParams {
    pub override_rules: bool,
    pub default_delete_rule: String,
    pub default_update_rule: String,
}

impl ForeignKeyParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = ForeignKeyParams {
            override_rules: params.is_yes("overrideRules"),
            default_delete_rule: params.get("defaultDeleteRule").unwrap_or("").to_string(),
            default_update_rule: params.get("defaultUpdateRule").unwrap_or("").to_string(),
        };
        let unknown = params.unknown_keys(&[
            "overrideRules",
            "defaultDeleteRule",
            "defaultUpdateRule",
            "targetName",
        ]);
        (parsed, unknown)
    }
}

/// Parameters understood by view migrators.
#[derive(Debug, Clone, Default)]
pub struct ViewParams {
    pub force_check_option: bool,
}

impl ViewParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = ViewParams {
            force_check_option: params.is_yes("forceCheckOption"),
        };
        let unknown = params.unknown_keys(&["forceCheckOption", "targetName"]);
        (parsed, unknown)
    }
}

/// Parameters understood by routine migrators.
#[derive(Debug, Clone, Default)]
pub struct RoutineParams {
    pub skip: bool,
}

impl RoutineParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = RoutineParams {
            skip: params.is_yes("Skip"),
        };
        let unknown = params.unknown_keys(&["Skip", "targetName"]);
        (parsed, unknown)
    }
}

/// Parameters understood by synonym migrators.
#[derive(Debug, Clone, Default)]
pub struct SynonymParams {
    pub skip_buildin_synonyms: bool,
}

impl SynonymParams {
    pub fn from_params(params: &ParamMap) -> (Self, Vec<String>) {
        let parsed = SynonymParams {
            skip_buildin_synonyms: params.is_yes("skipBuildinSynonyms"),
        };
        let unknown = params.unknown_keys(&["skipBuildinSynonyms", "targetName"]);
        (parsed, unknown)
    }
}
