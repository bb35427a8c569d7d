//! Catalog source parsing and field-level validation.
//!
//! The on-disk shape is `{ [frameworkId]: Framework }`. Entries are kept in
//! declaration order, unknown fields are ignored, and required fields are
//! checked with a precise location so a bad catalog fails loudly at startup.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::domain::foundation::{ControlId, ControlStatus, FrameworkId};

use super::{Category, CatalogError, ControlTemplate, Framework};

/// Serialization format of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                CatalogFormat::Yaml
            }
            _ => CatalogFormat::Json,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CatalogFormat::Json => "JSON",
            CatalogFormat::Yaml => "YAML",
        }
    }
}

/// Parses a catalog document into validated frameworks, in declaration order.
///
/// Identity checks (duplicate frameworks or control ids) are left to
/// [`super::FrameworkCatalog`], which owns the lookup index.
pub fn parse_catalog(source: &str, format: CatalogFormat) -> Result<Vec<Framework>, CatalogError> {
    let raw: RawCatalog = match format {
        CatalogFormat::Json => serde_json::from_str(source).map_err(|e| CatalogError::Parse {
            format: format.name(),
            message: e.to_string(),
        })?,
        CatalogFormat::Yaml => serde_yaml::from_str(source).map_err(|e| CatalogError::Parse {
            format: format.name(),
            message: e.to_string(),
        })?,
    };

    if raw.0.is_empty() {
        return Err(CatalogError::Empty);
    }

    raw.0
        .into_iter()
        .map(|(key, framework)| build_framework(key, framework))
        .collect()
}

fn build_framework(key: String, raw: RawFramework) -> Result<Framework, CatalogError> {
    let id = required(raw.id, &key, "id")?;
    if id != key {
        return Err(CatalogError::FrameworkIdMismatch { key, id });
    }
    let framework_id =
        FrameworkId::new(id.clone()).map_err(|_| CatalogError::missing_field(&key, "id"))?;

    let categories = raw
        .categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| build_category(&id, index, category))
        .collect::<Result<Vec<_>, _>>()?;

    let name = raw.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| id.clone());

    Ok(Framework::new(framework_id, name, raw.description, categories))
}

fn build_category(
    framework_id: &str,
    index: usize,
    raw: RawCategory,
) -> Result<Category, CatalogError> {
    let location = format!("{}/category #{}", framework_id, index + 1);
    let name = required(raw.name, &location, "name")?;

    let controls = raw
        .results
        .into_iter()
        .enumerate()
        .map(|(position, control)| {
            let location = format!("{}/{}/#{}", framework_id, name, position + 1);
            build_control(framework_id, &location, control)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Category::new(name, raw.description, controls))
}

fn build_control(
    framework_id: &str,
    location: &str,
    raw: RawControl,
) -> Result<ControlTemplate, CatalogError> {
    let id = required(raw.id, location, "id")?;
    let control = required(raw.control, location, "control")?;
    let status_text = required(raw.status, location, "status")?;

    let status: ControlStatus = status_text.parse().map_err(|_| CatalogError::InvalidStatus {
        location: location.to_string(),
        value: status_text.clone(),
    })?;

    let control_id =
        ControlId::new(id).map_err(|_| CatalogError::missing_field(location, "id"))?;

    if status.needs_remediation() && raw.recommendation.trim().is_empty() {
        return Err(CatalogError::MissingRecommendation {
            framework_id: framework_id.to_string(),
            control_id: control_id.to_string(),
            status: status.to_string(),
        });
    }

    let keywords = raw
        .keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    Ok(
        ControlTemplate::new(control_id, control, status, raw.details, raw.recommendation)
            .with_keywords(keywords),
    )
}

/// Treats absent and blank values alike.
fn required(
    value: Option<String>,
    location: &str,
    field: &'static str,
) -> Result<String, CatalogError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CatalogError::missing_field(location, field)),
    }
}

/// Reads a catalog file, choosing the format from its extension.
pub fn read_catalog_file(path: &Path) -> Result<Vec<Framework>, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_catalog(&source, CatalogFormat::from_path(path))
}

// ════════════════════════════════════════════════════════════════════════════════
// Raw source schema
// ════════════════════════════════════════════════════════════════════════════════

/// Framework entries in the order they appear in the source document.
struct RawCatalog(Vec<(String, RawFramework)>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of framework id to framework")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, RawFramework>()? {
                    entries.push((key, value));
                }
                Ok(RawCatalog(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawFramework {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    results: Vec<RawControl>,
}

#[derive(Debug, Deserialize)]
struct RawControl {
    id: Option<String>,
    control: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: String,
    #[serde(default)]
    recommendation: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Vec<Framework>, CatalogError> {
        parse_catalog(&value.to_string(), CatalogFormat::Json)
    }

    fn control(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "control": format!("Control {}", id),
            "status": "gap",
            "details": "Not addressed",
            "recommendation": "Address it"
        })
    }

    #[test]
    fn parses_frameworks_in_declaration_order() {
        let source = r#"{
            "ZETA": { "id": "ZETA", "name": "Zeta", "categories": [] },
            "ALPHA": { "id": "ALPHA", "name": "Alpha", "categories": [] }
        }"#;
        let frameworks = parse_catalog(source, CatalogFormat::Json).unwrap();
        let ids: Vec<&str> = frameworks.iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["ZETA", "ALPHA"]);
    }

    #[test]
    fn ignores_unknown_fields() {
        let frameworks = parse(json!({
            "F": {
                "id": "F",
                "name": "F",
                "version": "2.0",
                "categories": [{
                    "name": "Cat",
                    "owner": "someone",
                    "results": [{
                        "id": "C-1", "control": "c", "status": "gap",
                        "recommendation": "r", "weight": 3
                    }]
                }]
            }
        }))
        .unwrap();
        assert_eq!(frameworks[0].control_count(), 1);
    }

    #[test]
    fn missing_control_text_fails() {
        let err = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [
                { "id": "C-1", "status": "gap", "recommendation": "r" }
            ]}]}
        }))
        .unwrap_err();
        assert_eq!(err, CatalogError::missing_field("F/Cat/#1", "control"));
    }

    #[test]
    fn missing_status_fails() {
        let err = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [
                { "id": "C-1", "control": "c", "recommendation": "r" }
            ]}]}
        }))
        .unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "status", .. }));
    }

    #[test]
    fn missing_control_id_fails() {
        let err = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [
                { "control": "c", "status": "gap", "recommendation": "r" }
            ]}]}
        }))
        .unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "id", .. }));
    }

    #[test]
    fn missing_framework_id_fails() {
        let err = parse(json!({ "F": { "name": "F", "categories": [] } })).unwrap_err();
        assert_eq!(err, CatalogError::missing_field("F", "id"));
    }

    #[test]
    fn framework_key_must_match_id() {
        let err = parse(json!({ "F": { "id": "G", "categories": [] } })).unwrap_err();
        assert!(matches!(err, CatalogError::FrameworkIdMismatch { .. }));
    }

    #[test]
    fn unknown_status_fails() {
        let mut bad = control("C-1");
        bad["status"] = json!("done");
        let err = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [bad] }] }
        }))
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidStatus { ref value, .. } if value == "done"));
    }

    #[test]
    fn gap_without_recommendation_fails() {
        let mut bad = control("C-1");
        bad["recommendation"] = json!("  ");
        let err = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [bad] }] }
        }))
        .unwrap_err();
        assert!(matches!(err, CatalogError::MissingRecommendation { .. }));
    }

    #[test]
    fn met_without_recommendation_is_allowed() {
        let mut ok = control("C-1");
        ok["status"] = json!("met");
        ok["recommendation"] = json!("");
        let frameworks = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [ok] }] }
        }))
        .unwrap();
        assert_eq!(frameworks[0].controls().next().unwrap().status(), ControlStatus::Met);
    }

    #[test]
    fn keywords_are_normalized() {
        let mut with_keywords = control("C-1");
        with_keywords["keywords"] = json!(["  Asset Inventory ", "", "CMDB"]);
        let frameworks = parse(json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [with_keywords] }] }
        }))
        .unwrap();
        let control = frameworks[0].controls().next().unwrap();
        assert_eq!(control.keywords(), &["asset inventory".to_string(), "cmdb".to_string()]);
    }

    #[test]
    fn empty_catalog_fails() {
        assert_eq!(parse(json!({})).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_catalog("{ not json", CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { format: "JSON", .. }));
    }

    #[test]
    fn parses_yaml_sources() {
        let source = r#"
NIST_CSF:
  id: NIST_CSF
  name: NIST Cybersecurity Framework
  categories:
    - name: IDENTIFY (ID)
      results:
        - id: ID.AM-1
          control: Physical devices and systems are inventoried
          status: gap
          details: No inventory policy found
          recommendation: Maintain an asset inventory
"#;
        let frameworks = parse_catalog(source, CatalogFormat::Yaml).unwrap();
        assert_eq!(frameworks[0].categories()[0].name(), "IDENTIFY (ID)");
        assert_eq!(frameworks[0].control_count(), 1);
    }

    #[test]
    fn format_follows_file_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("c.yml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.YAML")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Json);
    }

    #[test]
    fn reads_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let source = json!({
            "F": { "id": "F", "categories": [{ "name": "Cat", "results": [control("C-1")] }] }
        });
        std::fs::write(&path, source.to_string()).unwrap();

        let frameworks = read_catalog_file(&path).unwrap();
        assert_eq!(frameworks.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_catalog_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
