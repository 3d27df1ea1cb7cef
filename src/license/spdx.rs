use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Splits a flattened expression on `OR` / `AND` operators.
///
/// `-`, `.` and `+` are identifier characters in SPDX ids, so they never count
/// as part of the separator (`GPL-3.0-or-later` stays whole).
static OPERATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[^\w.+\-]+(?:OR|AND)[^\w.+\-]+").expect("valid operator pattern")
});

/// The shapes a `package.json` license field is found in.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredLicense {
    Absent,
    Single(String),
    Structured { kind: String },
    Sequence(Vec<LicenseEntry>),
}

/// One element of a license array.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseEntry {
    Single(String),
    Structured { kind: String },
}

impl LicenseEntry {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(LicenseEntry::Single(s.clone())),
            Value::Object(_) => type_of(value).map(|kind| LicenseEntry::Structured { kind }),
            _ => None,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            LicenseEntry::Single(s) => s,
            LicenseEntry::Structured { kind } => kind,
        }
    }
}

impl DeclaredLicense {
    /// Convert a raw JSON value into a declared license.
    ///
    /// Shapes that cannot carry a license name (numbers, booleans, objects
    /// without a string `type`) are treated as absent.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => DeclaredLicense::Single(s.clone()),
            Some(v @ Value::Object(_)) => match type_of(v) {
                Some(kind) => DeclaredLicense::Structured { kind },
                None => DeclaredLicense::Absent,
            },
            Some(Value::Array(items)) => {
                DeclaredLicense::Sequence(items.iter().filter_map(LicenseEntry::from_value).collect())
            }
            _ => DeclaredLicense::Absent,
        }
    }

    /// Pick the license declaration out of a parsed manifest.
    ///
    /// `license` wins; the legacy `licenses` array is consulted only when
    /// `license` is absent.
    pub fn from_manifest(manifest: &Value) -> Self {
        match DeclaredLicense::from_value(manifest.get("license")) {
            DeclaredLicense::Absent => DeclaredLicense::from_value(manifest.get("licenses")),
            declared => declared,
        }
    }

    /// Flatten the declaration into a single expression string.
    fn expression(&self) -> String {
        match self {
            DeclaredLicense::Absent => String::new(),
            DeclaredLicense::Single(s) => s.clone(),
            DeclaredLicense::Structured { kind } => kind.clone(),
            DeclaredLicense::Sequence(entries) => entries
                .iter()
                .map(LicenseEntry::as_str)
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" OR "),
        }
    }
}

fn type_of(value: &Value) -> Option<String> {
    value
        .get("type")
        .and_then(|t| t.as_str())
        .map(str::to_string)
}

/// Normalize a declared license into canonical identifiers.
///
/// Parentheses are dropped and the expression is split on `OR` / `AND`; the
/// logical structure is not kept. Order of first appearance is preserved.
pub fn normalize(declared: &DeclaredLicense) -> Vec<String> {
    let flattened = declared.expression().replace(['(', ')'], "");
    let mut seen = HashSet::new();

    OPERATOR_RE
        .split(&flattened)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(value: Value) -> Vec<String> {
        normalize(&DeclaredLicense::from_value(Some(&value)))
    }

    #[test]
    fn test_equivalent_shapes() {
        assert_eq!(ids(json!("MIT")), vec!["MIT"]);
        assert_eq!(ids(json!({ "type": "MIT" })), vec!["MIT"]);
        assert_eq!(ids(json!(["MIT"])), vec!["MIT"]);
        assert_eq!(ids(json!([{ "type": "MIT", "url": "https://opensource.org/licenses/MIT" }])), vec!["MIT"]);
    }

    #[test]
    fn test_or_and_expressions() {
        assert_eq!(ids(json!("(MIT OR ISC)")), vec!["MIT", "ISC"]);
        assert_eq!(ids(json!("Apache-2.0 AND MIT")), vec!["Apache-2.0", "MIT"]);
        assert_eq!(ids(json!("(MIT AND (BSD-3-Clause or ISC))")), vec!["MIT", "BSD-3-Clause", "ISC"]);
    }

    #[test]
    fn test_identifier_suffixes_survive() {
        assert_eq!(ids(json!("GPL-3.0-or-later")), vec!["GPL-3.0-or-later"]);
        assert_eq!(ids(json!("GPL-2.0+ OR MIT")), vec!["GPL-2.0+", "MIT"]);
    }

    #[test]
    fn test_sequence_is_joined_with_or() {
        assert_eq!(ids(json!(["MIT", { "type": "Apache-2.0" }])), vec!["MIT", "Apache-2.0"]);
        assert_eq!(ids(json!(["", null, 3, { "url": "x" }, "ISC"])), vec!["ISC"]);
    }

    #[test]
    fn test_absent_is_empty() {
        assert!(normalize(&DeclaredLicense::Absent).is_empty());
        assert!(normalize(&DeclaredLicense::from_value(None)).is_empty());
        assert!(ids(json!("")).is_empty());
        assert!(ids(json!([])).is_empty());
        assert!(ids(json!({ "url": "https://example.com" })).is_empty());
        assert!(ids(json!(42)).is_empty());
    }

    #[test]
    fn test_dedupes_keeping_first_occurrence() {
        assert_eq!(ids(json!("ISC OR MIT OR ISC")), vec!["ISC", "MIT"]);
        assert_eq!(ids(json!(["MIT", "MIT"])), vec!["MIT"]);
    }

    #[test]
    fn test_idempotent_on_canonical_id() {
        let once = ids(json!("Apache-2.0"));
        let twice = normalize(&DeclaredLicense::Single(once[0].clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_manifest_prefers_license_over_licenses() {
        let manifest = json!({ "license": "MIT", "licenses": [{ "type": "GPL-2.0" }] });
        assert_eq!(normalize(&DeclaredLicense::from_manifest(&manifest)), vec!["MIT"]);

        let legacy = json!({ "licenses": [{ "type": "MIT" }, { "type": "Apache-2.0" }] });
        assert_eq!(normalize(&DeclaredLicense::from_manifest(&legacy)), vec!["MIT", "Apache-2.0"]);
    }

    #[test]
    fn test_from_value_shapes() {
        assert_eq!(
            DeclaredLicense::from_value(Some(&json!({ "type": "ISC" }))),
            DeclaredLicense::Structured { kind: "ISC".to_string() }
        );
        assert_eq!(
            DeclaredLicense::from_value(Some(&json!(["MIT", { "type": "ISC" }]))),
            DeclaredLicense::Sequence(vec![
                LicenseEntry::Single("MIT".to_string()),
                LicenseEntry::Structured { kind: "ISC".to_string() },
            ])
        );
        assert_eq!(DeclaredLicense::from_value(Some(&json!(true))), DeclaredLicense::Absent);
    }
}
