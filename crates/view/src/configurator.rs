use crate::route::Route;
use crate::view::View;
use domain::setting::TemplateSettings;
use tracing::debug;

/// Decides which template renders a view.
pub trait ViewConfigurator: Send + Sync {
    fn configure(&self, view: &mut dyn View);
}

/// Picks templates from settings.
///
/// A content-type override wins; otherwise a view without a template gets the
/// route default. A template already set by the builder is kept.
pub struct TemplateConfigurator {
    templates: TemplateSettings,
}

impl TemplateConfigurator {
    pub fn new(templates: TemplateSettings) -> Self {
        Self { templates }
    }

    pub fn default_template(&self, route: Route) -> &str {
        match route {
            Route::ContentCreate => &self.templates.content_create,
            Route::ContentEdit => &self.templates.content_edit,
        }
    }
}

impl ViewConfigurator for TemplateConfigurator {
    fn configure(&self, view: &mut dyn View) {
        let identifier = &view.content_type().identifier;
        if let Some(template) = self.templates.overrides.get(identifier) {
            debug!(content_type = %identifier, %template, "template override");
            view.set_template(template.clone());
        } else if view.template().is_empty() {
            let template = self.default_template(view.route()).to_string();
            view.set_template(template);
        }
    }
}
