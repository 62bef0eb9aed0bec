//! Validation of field definition settings.

use crate::form::FormError;
use crate::mapper::FieldMapperRegistry;
use crate::Error;
use domain::FieldDefinition;

pub const FIELD_SETTINGS_MESSAGE: &str = "field_definition.field_settings";

/// Checks a field definition's settings against what its field type accepts.
pub struct FieldSettingsConstraint<'a> {
    registry: &'a FieldMapperRegistry,
}

impl<'a> FieldSettingsConstraint<'a> {
    pub fn new(registry: &'a FieldMapperRegistry) -> Self {
        Self { registry }
    }

    /// One violation per unsupported setting.
    pub fn validate(&self, definition: &FieldDefinition) -> Result<Vec<FormError>, Error> {
        let field_type = &definition.field_type_identifier;
        let mapper = self
            .registry
            .get(field_type)
            .ok_or_else(|| Error::UnknownFieldType(field_type.clone()))?;
        let allowed = mapper.allowed_settings();

        Ok(definition
            .field_settings
            .keys()
            .filter(|name| !allowed.contains(&name.as_str()))
            .map(|name| FormError {
                path: format!("fieldSettings.{name}"),
                message: FIELD_SETTINGS_MESSAGE.to_string(),
            })
            .collect())
    }
}
