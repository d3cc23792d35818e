//! Validation System - structural checks on config documents
//!
//! Rules produce structured violations.
//! The validator collects them; any violation rejects the whole document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::asset::is_valid_name;
use crate::settings::CONFIG_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationViolation {
    pub rule: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    /// One line per violation, joined for display.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| match (&v.expected, &v.actual) {
                (Some(expected), Some(actual)) => format!(
                    "{}: {} (expected {}, found {})",
                    v.rule, v.message, expected, actual
                ),
                _ => format!("{}: {}", v.rule, v.message),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// True when the only complaint is the schema version.
    pub fn is_version_mismatch(&self) -> bool {
        !self.violations.is_empty()
            && self.violations.iter().all(|v| v.rule == ConfigVersionRule.name())
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, doc: &Value) -> Vec<ValidationViolation>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Integer,
    Array,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Array => value.is_array(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Bool => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Array => "array",
        }
    }
}

/// Top-level fields of a config document, in serialization order.
pub const REQUIRED_FIELDS: &[(&str, FieldKind)] = &[
    ("prefix", FieldKind::String),
    ("size", FieldKind::String),
    ("enableSVGO", FieldKind::Bool),
    ("enableWebkitPrefix", FieldKind::Bool),
    ("enableBeforePseudo", FieldKind::Bool),
    ("svgList", FieldKind::Array),
    ("previewColor", FieldKind::String),
    ("configVersion", FieldKind::Integer),
];

/// Fields of every `svgList` element.
pub const ASSET_FIELDS: &[&str] = &["name", "originalSVG", "optimizedSVG"];

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// --- Concrete Rules ---

pub struct DocumentShapeRule;

impl ValidationRule for DocumentShapeRule {
    fn name(&self) -> &'static str { "document_shape" }

    fn validate(&self, doc: &Value) -> Vec<ValidationViolation> {
        if doc.is_object() {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            message: "Config must be a JSON object".to_string(),
            expected: Some("object".to_string()),
            actual: Some(type_of(doc).to_string()),
        }]
    }
}

pub struct FieldTypeRule;

impl ValidationRule for FieldTypeRule {
    fn name(&self) -> &'static str { "field_types" }

    fn validate(&self, doc: &Value) -> Vec<ValidationViolation> {
        let Some(map) = doc.as_object() else {
            return vec![];
        };

        REQUIRED_FIELDS
            .iter()
            .filter_map(|&(field, kind)| match map.get(field) {
                None => Some(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("Missing field `{}`", field),
                    expected: Some(kind.label().to_string()),
                    actual: None,
                }),
                Some(value) if !kind.matches(value) => Some(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("Wrong type for `{}`", field),
                    expected: Some(kind.label().to_string()),
                    actual: Some(type_of(value).to_string()),
                }),
                Some(_) => None,
            })
            .collect()
    }
}

pub struct SvgListRule;

impl SvgListRule {
    fn check_entry(
        &self,
        index: usize,
        entry: &Map<String, Value>,
        seen: &mut HashSet<String>,
    ) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        for &field in ASSET_FIELDS {
            match entry.get(field) {
                Some(Value::String(_)) => {}
                other => violations.push(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("svgList[{}].{} must be a string", index, field),
                    expected: Some("string".to_string()),
                    actual: Some(other.map_or("missing", type_of).to_string()),
                }),
            }
        }

        if let Some(name) = entry.get("name").and_then(Value::as_str) {
            if !is_valid_name(name) {
                violations.push(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("svgList[{}].name {:?} is not a valid class name", index, name),
                    expected: None,
                    actual: None,
                });
            } else if !seen.insert(name.to_string()) {
                violations.push(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("svgList[{}].name {:?} is a duplicate", index, name),
                    expected: None,
                    actual: None,
                });
            }
        }

        violations
    }
}

impl ValidationRule for SvgListRule {
    fn name(&self) -> &'static str { "svg_list" }

    fn validate(&self, doc: &Value) -> Vec<ValidationViolation> {
        let Some(list) = doc.get("svgList").and_then(Value::as_array) else {
            return vec![];
        };

        let mut violations = vec![];
        let mut seen = HashSet::new();

        for (index, entry) in list.iter().enumerate() {
            match entry.as_object() {
                Some(entry) => violations.extend(self.check_entry(index, entry, &mut seen)),
                None => violations.push(ValidationViolation {
                    rule: self.name().to_string(),
                    message: format!("svgList[{}] must be an object", index),
                    expected: Some("object".to_string()),
                    actual: Some(type_of(entry).to_string()),
                }),
            }
        }

        violations
    }
}

pub struct ConfigVersionRule;

impl ValidationRule for ConfigVersionRule {
    fn name(&self) -> &'static str { "config_version" }

    fn validate(&self, doc: &Value) -> Vec<ValidationViolation> {
        // Non-integers are reported by `FieldTypeRule`.
        let Some(version) = doc.get("configVersion").filter(|v| FieldKind::Integer.matches(v)) else {
            return vec![];
        };
        if version.as_i64() == Some(CONFIG_VERSION) {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            message: "Unsupported config version".to_string(),
            expected: Some(CONFIG_VERSION.to_string()),
            actual: Some(version.to_string()),
        }]
    }
}

/// Validator runs every rule; the document is valid only with zero violations.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DocumentShapeRule),
                Box::new(FieldTypeRule),
                Box::new(SvgListRule),
                Box::new(ConfigVersionRule),
            ],
        }
    }

    pub fn validate(&self, doc: &Value) -> ValidationResult {
        let violations: Vec<_> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(doc))
            .collect();

        ValidationResult {
            valid: violations.is_empty(),
            violations,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
