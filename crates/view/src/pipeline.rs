// crates/view/src/pipeline.rs

//! Explicit view building sequence.
//!
//! A request runs through three steps, always in this order:
//!
//! 1. the route's controller identifier is stored under `_controller`,
//! 2. every filter sees the parameters and may add to them,
//! 3. the first builder matching the route produces the view.

use crate::action::ActionDispatcher;
use crate::builder::{ContentCreateViewBuilder, ContentEditViewBuilder, ViewBuilder};
use crate::configurator::{TemplateConfigurator, ViewConfigurator};
use crate::event::FilterViewBuilderParametersEvent;
use crate::filter::{ContentCreateViewFilter, ContentEditViewFilter, ViewParametersFilter};
use crate::injector::{CustomParametersInjector, ParametersInjector};
use crate::params::ViewRequest;
use crate::route::{Route, CONTROLLER_KEY};
use crate::view::ViewResult;
use crate::Error;
use domain::{Repository, Settings};
use forms::FormFactory;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ViewPipeline {
    filters: Vec<Box<dyn ViewParametersFilter>>,
    builders: Vec<Box<dyn ViewBuilder>>,
}

impl ViewPipeline {
    /// Standard wiring: both filters, both builders, templates from settings.
    pub fn new<F: FormFactory + 'static>(
        repository: Arc<dyn Repository>,
        form_factory: Arc<F>,
        dispatcher: Arc<dyn ActionDispatcher>,
        settings: &Settings,
    ) -> Self {
        let templates = TemplateConfigurator::new(settings.templates.clone());
        let create_template = templates.default_template(Route::ContentCreate).to_string();
        let edit_template = templates.default_template(Route::ContentEdit).to_string();
        let configurator: Arc<dyn ViewConfigurator> = Arc::new(templates);
        let injector: Arc<dyn ParametersInjector> = Arc::new(CustomParametersInjector);

        Self::empty()
            .with_filter(ContentCreateViewFilter::new(
                repository.clone(),
                form_factory.clone(),
            ))
            .with_filter(ContentEditViewFilter::new(repository.clone(), form_factory))
            .with_builder(ContentCreateViewBuilder::new(
                repository.clone(),
                configurator.clone(),
                injector.clone(),
                create_template,
                dispatcher.clone(),
            ))
            .with_builder(ContentEditViewBuilder::new(
                repository,
                configurator,
                injector,
                edit_template,
                dispatcher,
            ))
    }

    /// No filters, no builders.
    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
            builders: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl ViewParametersFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Builders are tried in registration order.
    pub fn with_builder(mut self, builder: impl ViewBuilder + 'static) -> Self {
        self.builders.push(Box::new(builder));
        self
    }

    #[tracing::instrument(skip_all, fields(route = ?route))]
    pub fn build(&self, route: Route, request: &ViewRequest) -> Result<ViewResult, Error> {
        let mut parameters = request.attributes.clone();
        parameters.insert(CONTROLLER_KEY, route.controller());

        {
            let mut event = FilterViewBuilderParametersEvent::new(&mut parameters, request);
            for filter in &self.filters {
                filter.handle(&mut event)?;
            }
        }
        debug!(count = parameters.len(), "parameters after filtering");

        let builder = self
            .builders
            .iter()
            .find(|b| b.matches(route))
            .ok_or(Error::NoBuilder(route))?;

        let result = builder.build_view(&parameters)?;
        info!(success = result.is_success(), "view built");
        Ok(result)
    }
}
