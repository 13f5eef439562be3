//! Typed views over parsed dbt documents
//!
//! dbt files are loosely shaped, so the views read leniently: a value of the
//! wrong type reads as absent instead of failing the whole document. Shape
//! errors that matter are reported by the checks.

use serde_yaml::{Mapping, Value};

/// Render a scalar as text; `None` for null, empty strings and collections
#[must_use]
pub fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether a `version` field is the literal 2 (as a number or a string)
#[must_use]
pub fn is_version_two(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| (v - 2.0).abs() < f64::EPSILON),
        Some(Value::String(s)) => s == "2",
        _ => false,
    }
}

fn mapping_of(value: Option<&Value>) -> Option<&Mapping> {
    value.and_then(Value::as_mapping)
}

fn sequence_of(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

// =============================================================================
// dbt_project.yml
// =============================================================================

/// View over `dbt_project.yml`
#[derive(Debug, Clone, Copy)]
pub struct ProjectConfig<'a> {
    doc: &'a Mapping,
}

impl<'a> ProjectConfig<'a> {
    /// Wrap a parsed project descriptor
    #[must_use]
    pub const fn new(doc: &'a Mapping) -> Self {
        Self { doc }
    }

    /// Project name, if set and non-empty
    #[must_use]
    pub fn name(&self) -> Option<String> {
        scalar_string(self.doc.get("name"))
    }

    /// Profile name, if set and non-empty
    #[must_use]
    pub fn profile(&self) -> Option<String> {
        scalar_string(self.doc.get("profile"))
    }

    /// Paths declared under a path-list key such as `model-paths`
    ///
    /// A bare string is read as a one-element list. Non-scalar entries are
    /// skipped.
    #[must_use]
    pub fn path_list(&self, key: &str) -> Vec<String> {
        match self.doc.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| scalar_string(Some(item)))
                .collect(),
            single @ Some(Value::String(_)) => scalar_string(single).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// profiles.yml
// =============================================================================

/// View over `profiles.yml`
#[derive(Debug, Clone, Copy)]
pub struct ProfilesConfig<'a> {
    doc: &'a Mapping,
}

impl<'a> ProfilesConfig<'a> {
    /// Wrap a parsed profiles document
    #[must_use]
    pub const fn new(doc: &'a Mapping) -> Self {
        Self { doc }
    }

    /// All profile names, in document order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.doc
            .keys()
            .filter_map(|k| scalar_string(Some(k)))
            .collect()
    }

    /// Look up a profile by name
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<Profile> {
        self.doc
            .iter()
            .find(|(k, _)| scalar_string(Some(*k)).as_deref() == Some(name))
            .map(|(_, v)| Profile::from_value(v))
    }
}

/// One profile: a default target and its outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Default target name
    pub target: Option<String>,
    /// Outputs in document order
    pub outputs: Vec<Output>,
}

impl Profile {
    fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_mapping() else {
            return Self::default();
        };

        let outputs = mapping_of(map.get("outputs"))
            .map(|outputs| {
                outputs
                    .iter()
                    .map(|(name, out)| Output::from_value(name, out))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            target: scalar_string(map.get("target")),
            outputs,
        }
    }

    /// Whether an output with this name exists
    #[must_use]
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|o| o.name == name)
    }
}

/// One output: a concrete connection configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Output name (key under `outputs`)
    pub name: String,
    /// Adapter type, e.g. `bigquery`
    pub adapter: Option<String>,
    /// Authentication method, e.g. `service-account`
    pub method: Option<String>,
    /// Key file, only when it is a string
    pub keyfile: Option<String>,
}

impl Output {
    fn from_value(name: &Value, value: &Value) -> Self {
        let name = scalar_string(Some(name)).unwrap_or_default();
        let Some(map) = value.as_mapping() else {
            return Self {
                name,
                ..Self::default()
            };
        };

        Self {
            name,
            adapter: scalar_string(map.get("type")),
            method: scalar_string(map.get("method")),
            keyfile: map.get("keyfile").and_then(Value::as_str).map(str::to_string),
        }
    }
}

// =============================================================================
// models/schema.yml
// =============================================================================

/// View over `models/schema.yml`
#[derive(Debug, Clone, Copy)]
pub struct SchemaSpec<'a> {
    doc: &'a Mapping,
}

/// A single test entry attached to a column
#[derive(Debug, Clone, Copy)]
pub struct ColumnTest<'a> {
    /// Owning model name, if any
    pub model: Option<&'a str>,
    /// Owning column name, if any
    pub column: Option<&'a str>,
    /// The test entry: a bare name or a configuration mapping
    pub test: &'a Value,
}

impl<'a> SchemaSpec<'a> {
    /// Wrap a parsed schema document
    #[must_use]
    pub const fn new(doc: &'a Mapping) -> Self {
        Self { doc }
    }

    /// Whether `version: 2` is declared
    #[must_use]
    pub fn has_version_two(&self) -> bool {
        is_version_two(self.doc.get("version"))
    }

    /// Model entries, or `None` if `models` is not a list
    #[must_use]
    pub fn models(&self) -> Option<&'a [Value]> {
        self.doc
            .get("models")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
    }

    /// Every column test of every model, in document order
    ///
    /// Reads both `tests` and `data_tests` on each column.
    #[must_use]
    pub fn column_tests(&self) -> Vec<ColumnTest<'a>> {
        let mut tests = Vec::new();
        for model in self.models().unwrap_or_default() {
            let Some(model) = model.as_mapping() else {
                continue;
            };
            let model_name = model.get("name").and_then(Value::as_str);

            for column in sequence_of(model.get("columns")) {
                let Some(column) = column.as_mapping() else {
                    continue;
                };
                let column_name = column.get("name").and_then(Value::as_str);

                for key in ["tests", "data_tests"] {
                    for test in sequence_of(column.get(key)) {
                        tests.push(ColumnTest {
                            model: model_name,
                            column: column_name,
                            test,
                        });
                    }
                }
            }
        }
        tests
    }
}

impl ColumnTest<'_> {
    /// The `accepted_values` configuration, if this is one in mapping form
    #[must_use]
    pub fn accepted_values(&self) -> Option<&Mapping> {
        mapping_of(self.test.as_mapping()?.get("accepted_values"))
    }
}

// =============================================================================
// models/sources.yml
// =============================================================================

/// View over `models/sources.yml`
#[derive(Debug, Clone, Copy)]
pub struct SourcesSpec<'a> {
    doc: &'a Mapping,
}

impl<'a> SourcesSpec<'a> {
    /// Wrap a parsed sources document
    #[must_use]
    pub const fn new(doc: &'a Mapping) -> Self {
        Self { doc }
    }

    /// Whether `version: 2` is declared
    #[must_use]
    pub fn has_version_two(&self) -> bool {
        is_version_two(self.doc.get("version"))
    }

    /// Source entries, or `None` if `sources` is not a list
    #[must_use]
    pub fn sources(&self) -> Option<&'a [Value]> {
        self.doc
            .get("sources")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
    }
}

/// Name of a source entry, if it has one
#[must_use]
pub fn source_name(source: &Value) -> Option<String> {
    scalar_string(source.as_mapping()?.get("name"))
}

/// Whether a source entry declares `database`
#[must_use]
pub fn source_has_database(source: &Value) -> bool {
    source
        .as_mapping()
        .is_some_and(|map| map.contains_key("database"))
}
