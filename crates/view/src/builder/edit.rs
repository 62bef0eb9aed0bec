// crates/view/src/builder/edit.rs

use super::{require_form, ViewBuilder};
use crate::action::{ActionContext, ActionDispatcher};
use crate::configurator::ViewConfigurator;
use crate::injector::ParametersInjector;
use crate::params::{ParamValue, RequestParameters};
use crate::resolve::resolve_language;
use crate::route::Route;
use crate::view::{ContentEditView, View, ViewParameters, ViewResult};
use crate::Error;
use domain::{Content, ContentType, Language, Location, Repository};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Builds the content draft edit screen.
///
/// Unlike the create screen, a response returned by the dispatcher never
/// replaces the view; it rides along on `ContentEditView::response`.
pub struct ContentEditViewBuilder {
    repository: Arc<dyn Repository>,
    configurator: Arc<dyn ViewConfigurator>,
    injector: Arc<dyn ParametersInjector>,
    default_template: String,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl ContentEditViewBuilder {
    pub fn new(
        repository: Arc<dyn Repository>,
        configurator: Arc<dyn ViewConfigurator>,
        injector: Arc<dyn ParametersInjector>,
        default_template: impl Into<String>,
        dispatcher: Arc<dyn ActionDispatcher>,
    ) -> Self {
        Self {
            repository,
            configurator,
            injector,
            default_template: default_template.into(),
            dispatcher,
        }
    }

    fn load_content(
        &self,
        parameters: &RequestParameters,
        language: &Language,
    ) -> Result<Content, Error> {
        if let Some(ParamValue::Content(content)) = parameters.get("content") {
            return Ok(content.clone());
        }

        let content_id = parameters.require_int("contentId")?;
        let version_no = parameters
            .optional_int("versionNo")?
            .map(|v| {
                u32::try_from(v).map_err(|_| {
                    Error::invalid_parameter("versionNo", format!("{v} is not a version number"))
                })
            })
            .transpose()?;

        debug!(content_id, ?version_no, "loading content draft");
        let languages = [language.language_code.clone()];
        Ok(self
            .repository
            .content_service()
            .load_content(content_id, Some(&languages[..]), version_no)?)
    }

    fn load_content_type(
        &self,
        parameters: &RequestParameters,
        content: &Content,
    ) -> Result<ContentType, Error> {
        match parameters.get("contentType") {
            Some(ParamValue::ContentType(content_type)) => Ok(content_type.clone()),
            _ => Ok(self
                .repository
                .content_type_service()
                .load_content_type(content.content_info.content_type_id)?),
        }
    }

    /// `location`, then `locationId`, then the content's main location.
    fn load_location(
        &self,
        parameters: &RequestParameters,
        content: &Content,
    ) -> Result<Option<Location>, Error> {
        if let Some(ParamValue::Location(location)) = parameters.get("location") {
            return Ok(Some(location.clone()));
        }

        let id = match parameters.optional_int("locationId")? {
            Some(id) => Some(id),
            None => content.content_info.main_location_id,
        };

        id.map(|id| self.repository.location_service().load_location(id))
            .transpose()
            .map_err(Error::from)
    }
}

impl ViewBuilder for ContentEditViewBuilder {
    fn matches(&self, route: Route) -> bool {
        route == Route::ContentEdit
    }

    #[tracing::instrument(skip_all)]
    fn build_view(&self, parameters: &RequestParameters) -> Result<ViewResult, Error> {
        let language = resolve_language(parameters, self.repository.language_service())?;
        let content = self.load_content(parameters, &language)?;
        let content_type = self.load_content_type(parameters, &content)?;
        let location = self.load_location(parameters, &content)?;
        let form = require_form(parameters)?;

        let mut response = None;
        if let (true, Some(action)) = (form.is_valid(), form.clicked_button()) {
            let action_context = ActionContext {
                referrer_location: location.clone(),
            };
            debug!(action, "dispatching form action");
            response = self.dispatcher.dispatch_form_action(
                form,
                &form.data_json()?,
                action,
                &action_context,
            )?;
        }

        let mut view = ContentEditView::new(
            &self.default_template,
            content,
            content_type,
            language,
            location,
            form.clone(),
        );
        view.set_response(response);

        let mut fixed = ViewParameters::new();
        fixed.insert("content".into(), json!(view.content()));
        fixed.insert("contentType".into(), json!(view.content_type()));
        fixed.insert("language".into(), json!(view.language()));
        fixed.insert("location".into(), json!(view.location()));
        fixed.insert("form".into(), json!(view.form().create_view()));
        view.add_parameters(fixed);

        self.injector.inject_view_parameters(&mut view, parameters);
        self.configurator.configure(&mut view);

        Ok(ViewResult::Edit(view))
    }
}
