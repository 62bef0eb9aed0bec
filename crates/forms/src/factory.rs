// crates/forms/src/factory.rs

use crate::constraint::FieldSettingsConstraint;
use crate::data::FormData;
use crate::form::{Form, FormError, FormShape, FIELDS_KEY};
use crate::mapper::FieldMapperRegistry;
use crate::options::FormOptions;
use crate::Error;
use serde_json::Value as Json;
use tracing::warn;

/// Constructs unbound forms. Binding happens later via `Form::handle_request`.
pub trait FormFactory: Send + Sync {
    fn create<T: FormData>(
        &self,
        shape: FormShape,
        data: T,
        options: FormOptions,
    ) -> Result<Form<T>, Error>;
}

/// Builds content forms with one child per field, mapped by field type.
pub struct DefaultFormFactory {
    registry: FieldMapperRegistry,
}

impl DefaultFormFactory {
    pub fn new(registry: FieldMapperRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FieldMapperRegistry {
        &self.registry
    }
}

impl Default for DefaultFormFactory {
    fn default() -> Self {
        Self::new(FieldMapperRegistry::with_defaults())
    }
}

impl FormFactory for DefaultFormFactory {
    #[tracing::instrument(skip_all, fields(shape = shape.name()))]
    fn create<T: FormData>(
        &self,
        shape: FormShape,
        data: T,
        options: FormOptions,
    ) -> Result<Form<T>, Error> {
        let mut form = Form::builder(shape.name(), shape, data)
            .options(options)
            .build()?;

        if !shape.is_content() {
            return Ok(form);
        }

        let language_code = form.options().get("languageCode").cloned().unwrap_or(Json::Null);
        let main_language_code = form
            .options()
            .get("mainLanguageCode")
            .cloned()
            .unwrap_or(Json::Null);

        let constraint = FieldSettingsConstraint::new(&self.registry);
        let mut violations = Vec::new();
        let mut field_forms = Vec::with_capacity(form.data().fields_data().len());
        for field_data in form.data().fields_data() {
            let mut field_form =
                Form::builder(field_data.identifier(), FormShape::FieldValue, field_data.value.clone())
                    .option("languageCode", language_code.clone())
                    .option("mainLanguageCode", main_language_code.clone())
                    .build()?;
            self.registry.map_field_value_form(&mut field_form, field_data)?;
            field_forms.push(field_form);

            for violation in constraint.validate(&field_data.field_definition)? {
                warn!(field = field_data.identifier(), path = %violation.path, "unsupported field setting");
                violations.push(FormError {
                    path: format!("{FIELDS_KEY}.{}.{}", field_data.identifier(), violation.path),
                    message: violation.message,
                });
            }
        }

        for field_form in field_forms {
            form.add(field_form);
        }
        for violation in violations {
            form.add_construction_error(violation);
        }

        Ok(form)
    }
}
