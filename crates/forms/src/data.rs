// crates/forms/src/data.rs

//! Data objects bound to content forms, and the mappers that fill them.

use domain::{Content, ContentType, FieldDefinition};
use serde::Serialize;
use serde_json::Value as Json;

/// Value of one field as edited on a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    pub field_definition: FieldDefinition,
    pub value: Json,
}

impl FieldData {
    pub fn identifier(&self) -> &str {
        &self.field_definition.identifier
    }

    /// `null`, `""` and `[]` all count as no value.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            Json::Null => true,
            Json::String(s) => s.trim().is_empty(),
            Json::Array(a) => a.is_empty(),
            Json::Object(o) => o.is_empty(),
            _ => false,
        }
    }
}

/// Anything a content form can be bound to.
pub trait FormData: Clone + Serialize {
    fn fields_data(&self) -> &[FieldData];
    fn fields_data_mut(&mut self) -> &mut [FieldData];
    fn content_type(&self) -> &ContentType;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCreateData {
    pub content_type: ContentType,
    pub main_language_code: String,
    pub parent_location_id: i64,
    pub fields_data: Vec<FieldData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdateData {
    pub content_id: i64,
    pub version_no: u32,
    pub initial_language_code: String,
    pub content_type: ContentType,
    pub fields_data: Vec<FieldData>,
}

impl FormData for ContentCreateData {
    fn fields_data(&self) -> &[FieldData] {
        &self.fields_data
    }

    fn fields_data_mut(&mut self) -> &mut [FieldData] {
        &mut self.fields_data
    }

    fn content_type(&self) -> &ContentType {
        &self.content_type
    }
}

impl FormData for ContentUpdateData {
    fn fields_data(&self) -> &[FieldData] {
        &self.fields_data
    }

    fn fields_data_mut(&mut self) -> &mut [FieldData] {
        &mut self.fields_data
    }

    fn content_type(&self) -> &ContentType {
        &self.content_type
    }
}

/// Maps a content draft to the data of an edit form.
pub struct ContentUpdateMapper;

impl ContentUpdateMapper {
    /// Fields missing in `language_code` start from the definition default.
    pub fn map_to_form_data(
        content: &Content,
        language_code: &str,
        content_type: &ContentType,
    ) -> ContentUpdateData {
        let fields_data = content_type
            .ordered_field_definitions()
            .into_iter()
            .map(|fd| FieldData {
                value: content
                    .field_value(&fd.identifier, language_code)
                    .cloned()
                    .unwrap_or_else(|| fd.default_value.clone()),
                field_definition: fd.clone(),
            })
            .collect();

        ContentUpdateData {
            content_id: content.id(),
            version_no: content.version_no(),
            initial_language_code: language_code.to_string(),
            content_type: content_type.clone(),
            fields_data,
        }
    }
}

/// Maps a content type to the data of a create form.
pub struct ContentCreateMapper;

impl ContentCreateMapper {
    pub fn map_to_form_data(
        content_type: &ContentType,
        main_language_code: &str,
        parent_location_id: i64,
    ) -> ContentCreateData {
        let fields_data = content_type
            .ordered_field_definitions()
            .into_iter()
            .map(|fd| FieldData {
                value: fd.default_value.clone(),
                field_definition: fd.clone(),
            })
            .collect();

        ContentCreateData {
            content_type: content_type.clone(),
            main_language_code: main_language_code.to_string(),
            parent_location_id,
            fields_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ContentInfo, Field, VersionInfo, VersionStatus};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn def(identifier: &str, position: i32, default_value: Json) -> FieldDefinition {
        FieldDefinition {
            id: position as i64,
            identifier: identifier.into(),
            field_type_identifier: "keyword".into(),
            is_required: false,
            position,
            names: BTreeMap::new(),
            default_value,
            field_settings: BTreeMap::new(),
        }
    }

    fn article() -> ContentType {
        ContentType {
            id: 16,
            identifier: "article".into(),
            main_language_code: "eng-GB".into(),
            names: BTreeMap::new(),
            field_definitions: vec![def("tags", 2, json!(["default"])), def("topics", 1, Json::Null)],
        }
    }

    fn draft() -> Content {
        Content {
            content_info: ContentInfo {
                id: 52,
                content_type_id: 16,
                main_language_code: "eng-GB".into(),
                name: "Post".into(),
                main_location_id: Some(60),
            },
            version_info: VersionInfo {
                version_no: 3,
                status: VersionStatus::Draft,
                language_codes: vec!["eng-GB".into(), "ger-DE".into()],
            },
            fields: vec![
                Field {
                    field_def_identifier: "tags".into(),
                    language_code: "eng-GB".into(),
                    value: json!(["rust"]),
                },
                Field {
                    field_def_identifier: "tags".into(),
                    language_code: "ger-DE".into(),
                    value: json!(["rost"]),
                },
            ],
        }
    }

    #[test]
    fn update_mapper_picks_values_for_the_language() {
        let data = ContentUpdateMapper::map_to_form_data(&draft(), "ger-DE", &article());

        assert_eq!(data.content_id, 52);
        assert_eq!(data.version_no, 3);
        assert_eq!(data.initial_language_code, "ger-DE");
        assert_eq!(data.content_type.id, 16);

        let idents: Vec<_> = data.fields_data.iter().map(FieldData::identifier).collect();
        assert_eq!(idents, vec!["topics", "tags"]);
        assert_eq!(data.fields_data[1].value, json!(["rost"]));
        assert!(data.fields_data[0].is_empty());
    }

    #[test]
    fn update_mapper_falls_back_to_default_value() {
        let data = ContentUpdateMapper::map_to_form_data(&draft(), "fre-FR", &article());
        assert_eq!(data.fields_data[1].value, json!(["default"]));
    }

    #[test]
    fn create_mapper_uses_defaults() {
        let data = ContentCreateMapper::map_to_form_data(&article(), "eng-GB", 2);
        assert_eq!(data.parent_location_id, 2);
        assert_eq!(data.main_language_code, "eng-GB");
        assert_eq!(data.fields_data.len(), 2);
        assert_eq!(data.fields_data[1].value, json!(["default"]));
        assert_eq!(data.content_type().identifier, "article");
    }
}
