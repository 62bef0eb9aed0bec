use super::FieldValueFormMapper;
use crate::data::FieldData;
use crate::form::{Form, FormShape};
use crate::options::OptionsResolver;
use crate::Error;
use domain::FieldDefinition;
use serde_json::Value as Json;

pub const FIELD_TYPE: &str = "keyword";
pub const TRANSLATION_DOMAIN: &str = "content_type";

/// Form mapper for the keyword field type.
pub struct KeywordFormMapper;

/// Name in the form's main language, else the first non-empty name by
/// language code.
fn resolve_label<'a>(definition: &'a FieldDefinition, main_language: Option<&str>) -> Option<&'a str> {
    main_language
        .and_then(|code| definition.name(code))
        .or_else(|| {
            definition
                .names()
                .values()
                .map(String::as_str)
                .find(|n| !n.is_empty())
        })
}

impl FieldValueFormMapper for KeywordFormMapper {
    fn map_field_value_form(
        &self,
        field_form: &mut Form<Json>,
        data: &FieldData,
    ) -> Result<(), Error> {
        let definition = &data.field_definition;
        let label = resolve_label(definition, field_form.options().get_str("mainLanguageCode"));

        let value = Form::builder("value", FormShape::Keyword, data.value.clone())
            .option("required", definition.is_required)
            .option("label", label)
            .auto_initialize(false)
            .build()?;

        field_form.add(value);
        Ok(())
    }

    fn configure_options(&self, resolver: &mut OptionsResolver) {
        resolver.set_default("translation_domain", TRANSLATION_DOMAIN);
    }
}
