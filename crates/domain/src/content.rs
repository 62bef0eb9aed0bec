// crates/domain/src/content.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// Languages and locations
// ─────────────────────────────────────────────────────────────────────────────

/// A language configured in the repository, identified by its code (`eng-GB`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub language_code: String,
    pub name: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

/// A node in the content tree. New content is always created below one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub content_id: i64,
    #[serde(default)]
    pub parent_location_id: Option<i64>,
    #[serde(default)]
    pub path_string: String,
    #[serde(default)]
    pub hidden: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Content types
// ─────────────────────────────────────────────────────────────────────────────

/// Description of a single field of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: i64,
    pub identifier: String,
    pub field_type_identifier: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub position: i32,
    /// Display names keyed by language code.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub default_value: Json,
    #[serde(default)]
    pub field_settings: BTreeMap<String, Json>,
}

impl FieldDefinition {
    /// Name in the given language; empty names count as missing.
    pub fn name(&self, language_code: &str) -> Option<&str> {
        self.names
            .get(language_code)
            .map(String::as_str)
            .filter(|n| !n.is_empty())
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub id: i64,
    pub identifier: String,
    pub main_language_code: String,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
}

impl ContentType {
    pub fn field_definition(&self, identifier: &str) -> Option<&FieldDefinition> {
        self.field_definitions
            .iter()
            .find(|fd| fd.identifier == identifier)
    }

    /// Field definitions in display order.
    pub fn ordered_field_definitions(&self) -> Vec<&FieldDefinition> {
        let mut defs: Vec<&FieldDefinition> = self.field_definitions.iter().collect();
        defs.sort_by_key(|fd| fd.position);
        defs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub id: i64,
    pub content_type_id: i64,
    pub main_language_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub main_location_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version_no: u32,
    pub status: VersionStatus,
    pub language_codes: Vec<String>,
}

/// One translated value of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub field_def_identifier: String,
    pub language_code: String,
    #[serde(default)]
    pub value: Json,
}

/// A single version of a content item, including all of its translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub content_info: ContentInfo,
    pub version_info: VersionInfo,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Content {
    pub fn id(&self) -> i64 {
        self.content_info.id
    }

    pub fn version_no(&self) -> u32 {
        self.version_info.version_no
    }

    /// Value of `identifier` in `language_code`, if that translation exists.
    pub fn field_value(&self, identifier: &str, language_code: &str) -> Option<&Json> {
        self.fields
            .iter()
            .find(|f| f.field_def_identifier == identifier && f.language_code == language_code)
            .map(|f| &f.value)
    }

    pub fn has_language(&self, language_code: &str) -> bool {
        self.version_info
            .language_codes
            .iter()
            .any(|c| c == language_code)
    }
}
