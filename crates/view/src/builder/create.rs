// crates/view/src/builder/create.rs

use super::{require_form, ViewBuilder};
use crate::action::{ActionContext, ActionDispatcher};
use crate::configurator::ViewConfigurator;
use crate::injector::ParametersInjector;
use crate::params::RequestParameters;
use crate::resolve::resolve_context;
use crate::route::Route;
use crate::view::{ContentCreateSuccessView, ContentCreateView, View, ViewParameters, ViewResult};
use crate::Error;
use domain::Repository;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the content create screen.
pub struct ContentCreateViewBuilder {
    repository: Arc<dyn Repository>,
    configurator: Arc<dyn ViewConfigurator>,
    injector: Arc<dyn ParametersInjector>,
    default_template: String,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl ContentCreateViewBuilder {
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
}

impl ViewBuilder for ContentCreateViewBuilder {
    fn matches(&self, route: Route) -> bool {
        route == Route::ContentCreate
    }

    /// Resolve language, parent location and content type, then either
    /// short-circuit with the dispatcher's response or assemble the view.
    #[tracing::instrument(skip_all)]
    fn build_view(&self, parameters: &RequestParameters) -> Result<ViewResult, Error> {
        let context = resolve_context(parameters, self.repository.as_ref())?;
        let form = require_form(parameters)?;

        if let (true, Some(action)) = (form.is_valid(), form.clicked_button()) {
            let action_context = ActionContext {
                referrer_location: Some(context.parent_location.clone()),
            };
            debug!(action, "dispatching form action");
            let response = self.dispatcher.dispatch_form_action(
                form,
                &form.data_json()?,
                action,
                &action_context,
            )?;

            if let Some(response) = response {
                info!(status = %response.status, "create action produced a response");
                return Ok(ViewResult::CreateSuccess(ContentCreateSuccessView::new(response)));
            }
        }

        let mut view = ContentCreateView::new(&self.default_template, context, form.clone());

        let fixed: ViewParameters = [
            ("contentType", json!(view.content_type())),
            ("language", json!(view.language())),
            ("parentLocation", json!(view.location())),
            ("form", json!(view.form().create_view())),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        view.add_parameters(fixed);

        self.injector.inject_view_parameters(&mut view, parameters);
        self.configurator.configure(&mut view);

        Ok(ViewResult::Create(view))
    }
}
