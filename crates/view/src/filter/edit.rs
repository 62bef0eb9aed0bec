// crates/view/src/filter/edit.rs

use super::ViewParametersFilter;
use crate::event::FilterViewBuilderParametersEvent;
use crate::params::{ParamValue, RequestParameters};
use crate::route::Route;
use crate::Error;
use domain::Repository;
use forms::{ContentForm, ContentUpdateMapper, FormFactory, FormOptions, FormShape};
use std::sync::Arc;
use tracing::debug;

/// Loads the draft named by the request attributes and binds an edit form
/// to it, so the edit builder finds `form`, `content` and `contentType`.
pub struct ContentEditViewFilter<F> {
    repository: Arc<dyn Repository>,
    form_factory: Arc<F>,
}

impl<F: FormFactory> ContentEditViewFilter<F> {
    pub fn new(repository: Arc<dyn Repository>, form_factory: Arc<F>) -> Self {
        Self {
            repository,
            form_factory,
        }
    }
}

/// `languageCode`, else the legacy `language` attribute.
fn language_code(attributes: &RequestParameters) -> Result<&str, Error> {
    if attributes.contains("languageCode") {
        attributes.require_str("languageCode")
    } else {
        attributes.require_str("language")
    }
}

impl<F: FormFactory> ViewParametersFilter for ContentEditViewFilter<F> {
    #[tracing::instrument(skip_all)]
    fn handle(&self, event: &mut FilterViewBuilderParametersEvent<'_>) -> Result<(), Error> {
        if event.route() != Some(Route::ContentEdit) {
            return Ok(());
        }

        let request = event.request();
        let attributes = &request.attributes;
        let content_id = attributes.require_int("contentId")?;
        let language_code = language_code(attributes)?.to_string();
        let version_no = attributes.require_int("versionNo")?;
        let version_no = u32::try_from(version_no).map_err(|_| {
            Error::invalid_parameter("versionNo", format!("{version_no} is not a version number"))
        })?;

        let languages = [language_code.clone()];
        let content = self.repository.content_service().load_content(
            content_id,
            Some(&languages[..]),
            Some(version_no),
        )?;
        let content_type = self
            .repository
            .content_type_service()
            .load_content_type(content.content_info.content_type_id)?;
        debug!(content_id, version_no, content_type = %content_type.identifier, "binding edit form");

        let data = ContentUpdateMapper::map_to_form_data(&content, &language_code, &content_type);
        let options = FormOptions::new()
            .with("languageCode", language_code.as_str())
            .with("mainLanguageCode", content.content_info.main_language_code.as_str())
            .with("drafts_enabled", true);
        let mut form = self
            .form_factory
            .create(FormShape::ContentEdit, data, options)?;
        form.handle_request(&request.input);

        let parameters = event.parameters_mut();
        parameters.add([
            ("form", ParamValue::Form(ContentForm::from(form))),
            ("content", ParamValue::Content(content)),
            ("contentType", ParamValue::ContentType(content_type)),
        ]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ViewRequest;
    use crate::route::{CONTROLLER_KEY, CREATE_CONTROLLER, EDIT_CONTROLLER};
    use domain::InMemoryRepository;
    use forms::DefaultFormFactory;
    use serde_json::{json, Value as Json};

    const FIXTURE: &str = r#"
[[content_types]]
id = 16
identifier = "article"
main_language_code = "eng-GB"

[[content_types.field_definitions]]
id = 100
identifier = "tags"
field_type_identifier = "keyword"
position = 1

[[contents]]
[contents.content_info]
id = 52
content_type_id = 16
main_language_code = "eng-GB"
[contents.version_info]
version_no = 2
status = "draft"
language_codes = ["eng-GB", "ger-DE"]
[[contents.fields]]
field_def_identifier = "tags"
language_code = "ger-DE"
value = ["kiste"]

[[contents]]
[contents.content_info]
id = 53
content_type_id = 16
main_language_code = "eng-GB"
[contents.version_info]
version_no = 1
status = "draft"
language_codes = ["eng-GB"]

[access]
denied_contents = [53]
"#;

    fn filter() -> ContentEditViewFilter<DefaultFormFactory> {
        let repo = InMemoryRepository::from_toml_str(FIXTURE).unwrap();
        ContentEditViewFilter::new(Arc::new(repo), Arc::new(DefaultFormFactory::default()))
    }

    fn run(controller: &str, attributes: RequestParameters, input: Json) -> Result<RequestParameters, Error> {
        let request = ViewRequest::new(attributes, input);
        let mut parameters = RequestParameters::new().with(CONTROLLER_KEY, controller);
        let mut event = FilterViewBuilderParametersEvent::new(&mut parameters, &request);
        filter().handle(&mut event)?;
        Ok(parameters)
    }

    fn attributes(content_id: i64) -> RequestParameters {
        RequestParameters::new()
            .with("contentId", content_id)
            .with("languageCode", "ger-DE")
            .with("versionNo", 2i64)
    }

    #[test]
    fn other_routes_are_left_untouched() {
        let params = run(CREATE_CONTROLLER, attributes(52), Json::Null).unwrap();
        assert_eq!(params.len(), 1);
        let params = run("some:otherAction", attributes(52), Json::Null).unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn edit_route_gets_bound_form_and_draft() {
        let input = json!({ "_action": "saveDraft", "fieldsData": { "tags": { "value": "a, b" } } });
        let params = run(EDIT_CONTROLLER, attributes(52), input).unwrap();

        let form = params.form().expect("form");
        assert!(form.is_valid());
        assert_eq!(form.clicked_button(), Some("saveDraft"));
        assert_eq!(form.options().get_str("languageCode"), Some("ger-DE"));
        assert_eq!(form.options().get_str("mainLanguageCode"), Some("eng-GB"));
        assert_eq!(form.options().get_bool("drafts_enabled"), Some(true));

        let data = form.data_json().unwrap();
        assert_eq!(data["fieldsData"][0]["value"], json!(["a", "b"]));
        assert!(matches!(params.get("content"), Some(ParamValue::Content(c)) if c.version_no() == 2));
        assert!(matches!(params.get("contentType"), Some(ParamValue::ContentType(ct)) if ct.id == 16));
    }

    #[test]
    fn unsubmitted_form_starts_from_translation() {
        let params = run(EDIT_CONTROLLER, attributes(52), Json::Null).unwrap();
        let form = params.form().expect("form");
        assert!(!form.is_submitted());
        assert_eq!(form.data_json().unwrap()["fieldsData"][0]["value"], json!(["kiste"]));
    }

    #[test]
    fn legacy_language_attribute_is_accepted() {
        let attributes = RequestParameters::new()
            .with("contentId", 52i64)
            .with("language", "eng-GB")
            .with("versionNo", 2i64);
        let params = run(EDIT_CONTROLLER, attributes, Json::Null).unwrap();
        assert_eq!(
            params.form().unwrap().options().get_str("languageCode"),
            Some("eng-GB")
        );
    }

    #[test]
    fn missing_version_is_reported() {
        let attributes = RequestParameters::new()
            .with("contentId", 52i64)
            .with("languageCode", "eng-GB");
        let err = run(EDIT_CONTROLLER, attributes, Json::Null).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { name: "versionNo", .. }));
    }

    #[test]
    fn repository_failures_propagate() {
        let err = run(EDIT_CONTROLLER, attributes(99), Json::Null).unwrap_err();
        assert_eq!(err.to_status(), http::StatusCode::NOT_FOUND);

        let attributes = attributes(53).with("versionNo", 1i64).with("languageCode", "eng-GB");
        let err = run(EDIT_CONTROLLER, attributes, Json::Null).unwrap_err();
        assert_eq!(err.to_status(), http::StatusCode::FORBIDDEN);
    }
}
