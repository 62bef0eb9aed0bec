// crates/forms/src/mapper/mod.rs

//! Field value form mappers.
//!
//! Each field type registers one mapper. The form factory calls the registry
//! once per field definition; mappers never see each other.

pub mod keyword;

use crate::data::FieldData;
use crate::form::{Form, FormShape};
use crate::options::OptionsResolver;
use crate::Error;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::debug;

pub use keyword::KeywordFormMapper;

#[cfg_attr(test, mockall::automock)]
pub trait FieldValueFormMapper: Send + Sync {
    /// Attach the field type's `value` sub-form to `field_form`.
    fn map_field_value_form(&self, field_form: &mut Form<Json>, data: &FieldData)
        -> Result<(), Error>;

    /// Options this mapper adds to the field form.
    fn configure_options(&self, resolver: &mut OptionsResolver);

    /// Field setting names this field type accepts.
    fn allowed_settings(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

#[derive(Default)]
pub struct FieldMapperRegistry {
    mappers: BTreeMap<String, Box<dyn FieldValueFormMapper>>,
}

impl FieldMapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in field type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(keyword::FIELD_TYPE, KeywordFormMapper);
        registry
    }

    /// Returns the mapper previously registered for `field_type`, if any.
    pub fn register(
        &mut self,
        field_type: impl Into<String>,
        mapper: impl FieldValueFormMapper + 'static,
    ) -> Option<Box<dyn FieldValueFormMapper>> {
        self.mappers.insert(field_type.into(), Box::new(mapper))
    }

    pub fn get(&self, field_type: &str) -> Option<&dyn FieldValueFormMapper> {
        self.mappers.get(field_type).map(|m| m.as_ref())
    }

    pub fn field_types(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    /// Resolve the field form's options with the mapper's schema, then let the
    /// mapper attach the value sub-form.
    pub fn map_field_value_form(
        &self,
        field_form: &mut Form<Json>,
        data: &FieldData,
    ) -> Result<(), Error> {
        let field_type = &data.field_definition.field_type_identifier;
        let mapper = self
            .get(field_type)
            .ok_or_else(|| Error::UnknownFieldType(field_type.clone()))?;

        let mut resolver = OptionsResolver::new();
        FormShape::FieldValue.configure_options(&mut resolver);
        mapper.configure_options(&mut resolver);
        let options = resolver.resolve(field_form.name(), field_form.options().clone())?;
        field_form.set_options(options);

        debug!(field = data.identifier(), field_type = %field_type, "mapping field value form");
        mapper.map_field_value_form(field_form, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::FieldDefinition;
    use mockall::predicate::always;

    fn field(field_type: &str) -> FieldData {
        FieldData {
            field_definition: FieldDefinition {
                id: 1,
                identifier: "subject".into(),
                field_type_identifier: field_type.into(),
                is_required: false,
                position: 0,
                names: Default::default(),
                default_value: Json::Null,
                field_settings: Default::default(),
            },
            value: Json::Null,
        }
    }

    fn field_form() -> Form<Json> {
        Form::builder("subject", FormShape::FieldValue, Json::Null)
            .option("mainLanguageCode", "eng-GB")
            .build()
            .unwrap()
    }

    #[test]
    fn unknown_field_type_is_an_error() {
        let registry = FieldMapperRegistry::with_defaults();
        let err = registry
            .map_field_value_form(&mut field_form(), &field("ezgmaplocation"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFieldType(t) if t == "ezgmaplocation"));
    }

    #[test]
    fn registered_mapper_is_dispatched_by_field_type() {
        let mut mock = MockFieldValueFormMapper::new();
        mock.expect_configure_options().times(1).returning(|r| {
            r.set_default("translation_domain", "custom");
        });
        mock.expect_map_field_value_form()
            .with(always(), always())
            .times(1)
            .returning(|form, _| {
                assert_eq!(form.options().get_str("translation_domain"), Some("custom"));
                Ok(())
            });

        let mut registry = FieldMapperRegistry::with_defaults();
        assert!(registry.register("custom", mock).is_none());

        let types: Vec<_> = registry.field_types().collect();
        assert_eq!(types, vec!["custom", "keyword"]);

        registry
            .map_field_value_form(&mut field_form(), &field("custom"))
            .unwrap();
    }

    #[test]
    fn registering_twice_returns_previous_mapper() {
        let mut registry = FieldMapperRegistry::with_defaults();
        assert!(registry.register("keyword", KeywordFormMapper).is_some());
    }
}
