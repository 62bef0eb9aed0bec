// crates/view/src/view.rs

use crate::action::ActionResponse;
use crate::resolve::ResolvedContext;
use crate::route::Route;
use domain::{Content, ContentType, Language, Location};
use forms::ContentForm;
use serde_json::{json, Value as Json};
use std::collections::BTreeMap;

/// Parameters handed to the template layer.
pub type ViewParameters = BTreeMap<String, Json>;

/// What configurators and parameter injectors get to see and change.
pub trait View {
    fn route(&self) -> Route;
    fn template(&self) -> &str;
    fn set_template(&mut self, template: String);
    fn content_type(&self) -> &ContentType;
    fn parameters(&self) -> &ViewParameters;
    fn add_parameters(&mut self, parameters: ViewParameters);
}

// ─────────────────────────────────────────────────────────────────────────────
// Create
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ContentCreateView {
    template: String,
    context: ResolvedContext,
    form: ContentForm,
    parameters: ViewParameters,
}

impl ContentCreateView {
    pub fn new(template: impl Into<String>, context: ResolvedContext, form: ContentForm) -> Self {
        Self {
            template: template.into(),
            context,
            form,
            parameters: ViewParameters::new(),
        }
    }

    pub fn language(&self) -> &Language {
        &self.context.language
    }

    pub fn location(&self) -> &Location {
        &self.context.parent_location
    }

    pub fn form(&self) -> &ContentForm {
        &self.form
    }

    pub fn context(&self) -> &ResolvedContext {
        &self.context
    }
}

impl View for ContentCreateView {
    fn route(&self) -> Route {
        Route::ContentCreate
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn set_template(&mut self, template: String) {
        self.template = template;
    }

    fn content_type(&self) -> &ContentType {
        &self.context.content_type
    }

    fn parameters(&self) -> &ViewParameters {
        &self.parameters
    }

    fn add_parameters(&mut self, parameters: ViewParameters) {
        self.parameters.extend(parameters);
    }
}

/// Result of a create request whose action already produced a response.
#[derive(Debug, Clone)]
pub struct ContentCreateSuccessView {
    response: ActionResponse,
}

impl ContentCreateSuccessView {
    pub fn new(response: ActionResponse) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &ActionResponse {
        &self.response
    }

    pub fn into_response(self) -> ActionResponse {
        self.response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edit
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ContentEditView {
    template: String,
    content: Content,
    content_type: ContentType,
    language: Language,
    location: Option<Location>,
    form: ContentForm,
    response: Option<ActionResponse>,
    parameters: ViewParameters,
}

impl ContentEditView {
    pub fn new(
        template: impl Into<String>,
        content: Content,
        content_type: ContentType,
        language: Language,
        location: Option<Location>,
        form: ContentForm,
    ) -> Self {
        Self {
            template: template.into(),
            content,
            content_type,
            language,
            location,
            form,
            response: None,
            parameters: ViewParameters::new(),
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn form(&self) -> &ContentForm {
        &self.form
    }

    /// Response left by the dispatched action; the view is built regardless.
    pub fn response(&self) -> Option<&ActionResponse> {
        self.response.as_ref()
    }

    pub(crate) fn set_response(&mut self, response: Option<ActionResponse>) {
        self.response = response;
    }
}

impl View for ContentEditView {
    fn route(&self) -> Route {
        Route::ContentEdit
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn set_template(&mut self, template: String) {
        self.template = template;
    }

    fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    fn parameters(&self) -> &ViewParameters {
        &self.parameters
    }

    fn add_parameters(&mut self, parameters: ViewParameters) {
        self.parameters.extend(parameters);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result
// ─────────────────────────────────────────────────────────────────────────────

/// Exactly one of these is produced per request.
#[derive(Debug, Clone)]
pub enum ViewResult {
    CreateSuccess(ContentCreateSuccessView),
    Create(ContentCreateView),
    Edit(ContentEditView),
}

impl ViewResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ViewResult::CreateSuccess(_))
    }

    pub fn as_view(&self) -> Option<&dyn View> {
        match self {
            ViewResult::CreateSuccess(_) => None,
            ViewResult::Create(v) => Some(v),
            ViewResult::Edit(v) => Some(v),
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            ViewResult::CreateSuccess(s) => json!({
                "kind": "success",
                "response": s.response().to_json(),
            }),
            ViewResult::Create(v) => json!({
                "kind": "content_create",
                "template": v.template(),
                "parameters": v.parameters(),
            }),
            ViewResult::Edit(v) => json!({
                "kind": "content_edit",
                "template": v.template(),
                "parameters": v.parameters(),
                "response": v.response().map(ActionResponse::to_json),
            }),
        }
    }
}
