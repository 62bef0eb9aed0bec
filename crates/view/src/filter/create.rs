// crates/view/src/filter/create.rs

use super::ViewParametersFilter;
use crate::event::FilterViewBuilderParametersEvent;
use crate::params::ParamValue;
use crate::resolve::resolve_context;
use crate::route::Route;
use crate::Error;
use domain::Repository;
use forms::{ContentCreateMapper, ContentForm, FormFactory, FormOptions, FormShape};
use std::sync::Arc;
use tracing::debug;

/// Binds a create form when the caller did not supply one.
///
/// The resolved language, parent location and content type are added as
/// objects so the builder does not load them a second time.
pub struct ContentCreateViewFilter<F> {
    repository: Arc<dyn Repository>,
    form_factory: Arc<F>,
}

impl<F: FormFactory> ContentCreateViewFilter<F> {
    pub fn new(repository: Arc<dyn Repository>, form_factory: Arc<F>) -> Self {
        Self {
            repository,
            form_factory,
        }
    }
}

impl<F: FormFactory> ViewParametersFilter for ContentCreateViewFilter<F> {
    #[tracing::instrument(skip_all)]
    fn handle(&self, event: &mut FilterViewBuilderParametersEvent<'_>) -> Result<(), Error> {
        if event.route() != Some(Route::ContentCreate) || event.parameters().form().is_some() {
            return Ok(());
        }

        let context = resolve_context(event.parameters(), self.repository.as_ref())?;
        let code = context.language.language_code.as_str();
        debug!(content_type = %context.content_type.identifier, code, "binding create form");

        let data = ContentCreateMapper::map_to_form_data(
            &context.content_type,
            code,
            context.parent_location.id,
        );
        let options = FormOptions::new()
            .with("languageCode", code)
            .with("mainLanguageCode", code);
        let mut form = self
            .form_factory
            .create(FormShape::ContentCreate, data, options)?;
        form.handle_request(&event.request().input);

        event.parameters_mut().add([
            ("form", ParamValue::Form(ContentForm::from(form))),
            ("language", ParamValue::Language(context.language)),
            ("parentLocation", ParamValue::Location(context.parent_location)),
            ("contentType", ParamValue::ContentType(context.content_type)),
        ]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RequestParameters, ViewRequest};
    use crate::route::{CONTROLLER_KEY, CREATE_CONTROLLER, EDIT_CONTROLLER};
    use domain::InMemoryRepository;
    use forms::DefaultFormFactory;
    use serde_json::{json, Value as Json};

    const FIXTURE: &str = r#"
[[languages]]
id = 2
language_code = "eng-GB"
name = "English"

[[locations]]
id = 2
content_id = 1
path_string = "/1/2/"

[[content_types]]
id = 16
identifier = "article"
main_language_code = "eng-GB"

[[content_types.field_definitions]]
id = 100
identifier = "tags"
field_type_identifier = "keyword"
is_required = true
position = 1
"#;

    fn run(controller: &str, mut parameters: RequestParameters, input: Json) -> Result<RequestParameters, Error> {
        let repo = InMemoryRepository::from_toml_str(FIXTURE).unwrap();
        let filter = ContentCreateViewFilter::new(Arc::new(repo), Arc::new(DefaultFormFactory::default()));
        let request = ViewRequest::new(parameters.clone(), input);
        parameters.insert(CONTROLLER_KEY, controller);
        let mut event = FilterViewBuilderParametersEvent::new(&mut parameters, &request);
        filter.handle(&mut event)?;
        Ok(parameters)
    }

    fn attributes() -> RequestParameters {
        RequestParameters::new()
            .with("languageCode", "eng-GB")
            .with("parentLocationId", 2i64)
            .with("contentTypeIdentifier", "article")
    }

    #[test]
    fn binds_form_and_resolved_objects() {
        let input = json!({ "_action": "publish", "fieldsData": { "tags": { "value": "x" } } });
        let params = run(CREATE_CONTROLLER, attributes(), input).unwrap();

        let form = params.form().expect("form");
        assert!(form.is_valid());
        assert_eq!(form.clicked_button(), Some("publish"));
        assert_eq!(form.data_json().unwrap()["parentLocationId"], json!(2));
        assert!(matches!(params.get("language"), Some(ParamValue::Language(l)) if l.id == 2));
        assert!(matches!(params.get("parentLocation"), Some(ParamValue::Location(l)) if l.id == 2));
        assert!(matches!(params.get("contentType"), Some(ParamValue::ContentType(ct)) if ct.id == 16));
    }

    #[test]
    fn edit_route_is_left_untouched() {
        let params = run(EDIT_CONTROLLER, attributes(), Json::Null).unwrap();
        assert!(params.form().is_none());
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn resolution_errors_surface_before_building() {
        let attributes = RequestParameters::new()
            .with("languageCode", "eng-GB")
            .with("contentTypeIdentifier", "article");
        let err = run(CREATE_CONTROLLER, attributes, Json::Null).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { name: "ParentLocation", .. }));
    }
}
