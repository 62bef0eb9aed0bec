// crates/forms/src/form.rs

//! Two-phase forms.
//!
//! A form is first *constructed* from a shape, bound data and options
//! (`Form::builder` or a `FormFactory`), then *bound* to submitted input with
//! `handle_request`. Binding writes the submitted values into the data,
//! records the clicked button, and collects violations. Nothing here touches
//! the repository.

use crate::data::{ContentCreateData, ContentUpdateData, FormData};
use crate::keyword;
use crate::options::{FormOptions, OptionsResolver};
use crate::Error;
use serde::Serialize;
use serde_json::{json, Value as Json};
use tracing::debug;

/// Input key carrying the name of the clicked submit button.
pub const ACTION_KEY: &str = "_action";

/// Input key holding submitted field values.
pub const FIELDS_KEY: &str = "fieldsData";

pub const NOT_BLANK_MESSAGE: &str = "This value should not be blank.";

// ─────────────────────────────────────────────────────────────────────────────
// Shapes
// ─────────────────────────────────────────────────────────────────────────────

/// Which kind of form this is. Each shape declares its options and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormShape {
    ContentCreate,
    ContentEdit,
    /// Wrapper around one field; receives a `value` child from a field mapper.
    FieldValue,
    Keyword,
}

impl FormShape {
    pub fn name(&self) -> &'static str {
        match self {
            FormShape::ContentCreate => "content_create",
            FormShape::ContentEdit => "content_edit",
            FormShape::FieldValue => "field_value",
            FormShape::Keyword => "keyword",
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, FormShape::ContentCreate | FormShape::ContentEdit)
    }

    pub fn configure_options(&self, resolver: &mut OptionsResolver) {
        match self {
            FormShape::ContentCreate | FormShape::ContentEdit => {
                resolver
                    .set_required(["languageCode", "mainLanguageCode"])
                    .set_default("drafts_enabled", false)
                    .set_default("translation_domain", "content_edit");
            }
            FormShape::FieldValue => {
                resolver.set_defined(["languageCode", "mainLanguageCode"]);
            }
            FormShape::Keyword => {
                resolver
                    .set_default("required", false)
                    .set_default("label", Json::Null);
            }
        }
    }

    /// Submit buttons, in display order.
    pub fn buttons(&self) -> &'static [&'static str] {
        match self {
            FormShape::ContentCreate => &["publish", "saveDraft", "cancel"],
            FormShape::ContentEdit => &["saveDraft", "publish", "cancel"],
            FormShape::FieldValue | FormShape::Keyword => &[],
        }
    }

    fn reverse_transform(&self, raw: &Json) -> Json {
        match self {
            FormShape::Keyword => keyword::reverse_transform(raw),
            _ => raw.clone(),
        }
    }

    fn transform(&self, value: &Json) -> Json {
        match self {
            FormShape::Keyword => keyword::transform(value),
            _ => value.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Form<T> {
    name: String,
    shape: FormShape,
    data: T,
    options: FormOptions,
    children: Vec<Form<Json>>,
    auto_initialize: bool,
    submitted: bool,
    clicked_button: Option<String>,
    errors: Vec<FormError>,
    /// Violations found while constructing; they survive every binding.
    construction_errors: Vec<FormError>,
}

pub struct FormBuilder<T> {
    name: String,
    shape: FormShape,
    data: T,
    options: FormOptions,
    auto_initialize: bool,
}

impl<T> FormBuilder<T> {
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Json>) -> Self {
        self.options.insert(name, value);
        self
    }

    pub fn options(mut self, options: FormOptions) -> Self {
        for (k, v) in options.iter() {
            self.options.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn auto_initialize(mut self, enabled: bool) -> Self {
        self.auto_initialize = enabled;
        self
    }

    /// Resolve options against the shape and produce the form.
    pub fn build(self) -> Result<Form<T>, Error> {
        let mut resolver = OptionsResolver::new();
        self.shape.configure_options(&mut resolver);
        let options = resolver.resolve(&self.name, self.options)?;

        Ok(Form {
            name: self.name,
            shape: self.shape,
            data: self.data,
            options,
            children: Vec::new(),
            auto_initialize: self.auto_initialize,
            submitted: false,
            clicked_button: None,
            errors: Vec::new(),
            construction_errors: Vec::new(),
        })
    }
}

impl<T> Form<T> {
    pub fn builder(name: impl Into<String>, shape: FormShape, data: T) -> FormBuilder<T> {
        FormBuilder {
            name: name.into(),
            shape,
            data,
            options: FormOptions::new(),
            auto_initialize: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> FormShape {
        self.shape
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub(crate) fn set_options(&mut self, options: FormOptions) {
        self.options = options;
    }

    pub fn auto_initialize(&self) -> bool {
        self.auto_initialize
    }

    /// Add a child; a child with the same name is replaced.
    pub fn add(&mut self, child: Form<Json>) -> &mut Self {
        match self.children.iter_mut().find(|c| c.name == child.name) {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Form<Json>> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children(&self) -> &[Form<Json>] {
        &self.children
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Submitted and without violations.
    pub fn is_valid(&self) -> bool {
        self.submitted && self.errors.is_empty()
    }

    pub fn clicked_button(&self) -> Option<&str> {
        self.clicked_button.as_deref()
    }

    pub fn errors(&self) -> &[FormError] {
        &self.errors
    }

    pub(crate) fn add_construction_error(&mut self, error: FormError) {
        self.errors.push(error.clone());
        self.construction_errors.push(error);
    }

    fn read_clicked_button(&mut self, input: &Json) {
        let buttons = self.shape.buttons();
        self.clicked_button = input
            .get(ACTION_KEY)
            .and_then(Json::as_str)
            .filter(|b| buttons.iter().any(|known| known == b))
            .map(str::to_string);
    }
}

impl Form<Json> {
    fn bind_value(&mut self, raw: &Json) {
        self.data = self.shape.reverse_transform(raw);
        self.submitted = true;
    }
}

impl<T: FormData> Form<T> {
    /// Bind submitted `input` to the form.
    ///
    /// Input that is not a JSON object means nothing was submitted and the
    /// form is left as is. Field values are read from
    /// `fieldsData.<identifier>.value`; fields absent from the input keep
    /// their current value.
    #[tracing::instrument(skip_all, fields(form = %self.name))]
    pub fn handle_request(&mut self, input: &Json) -> &mut Self {
        if !input.is_object() {
            return self;
        }

        self.submitted = true;
        self.errors = self.construction_errors.clone();
        self.read_clicked_button(input);

        let submitted_fields = input.get(FIELDS_KEY).cloned().unwrap_or_else(|| json!({}));

        for field_form in self.children.iter_mut() {
            field_form.submitted = true;
            let Some(raw) = submitted_fields.get(&field_form.name).and_then(|f| f.get("value"))
            else {
                continue;
            };
            let Some(value_form) = field_form.children.iter_mut().find(|c| c.name == "value")
            else {
                continue;
            };

            value_form.bind_value(raw);
            let bound = value_form.data.clone();
            field_form.data = bound.clone();

            if let Some(fd) = self
                .data
                .fields_data_mut()
                .iter_mut()
                .find(|fd| fd.identifier() == field_form.name)
            {
                fd.value = bound;
            }
        }

        for fd in self.data.fields_data() {
            if fd.field_definition.is_required && fd.is_empty() {
                self.errors.push(FormError {
                    path: format!("{FIELDS_KEY}.{}.value", fd.identifier()),
                    message: NOT_BLANK_MESSAGE.to_string(),
                });
            }
        }

        debug!(
            clicked = ?self.clicked_button,
            violations = self.errors.len(),
            "form bound"
        );
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Views
// ─────────────────────────────────────────────────────────────────────────────

/// Serializable projection of a form handed to templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub name: String,
    pub shape: FormShape,
    pub value: Json,
    pub options: FormOptions,
    pub submitted: bool,
    pub valid: bool,
    pub errors: Vec<FormError>,
    pub buttons: Vec<&'static str>,
    pub children: Vec<FormView>,
}

impl<T: Serialize> Form<T> {
    pub fn create_view(&self) -> FormView {
        let value = if self.children.is_empty() {
            let raw = serde_json::to_value(&self.data).unwrap_or(Json::Null);
            self.shape.transform(&raw)
        } else {
            Json::Null
        };

        FormView {
            name: self.name.clone(),
            shape: self.shape,
            value,
            options: self.options.clone(),
            submitted: self.submitted,
            valid: self.submitted && self.errors.is_empty(),
            errors: self.errors.clone(),
            buttons: self.shape.buttons().to_vec(),
            children: self.children.iter().map(Form::create_view).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content forms
// ─────────────────────────────────────────────────────────────────────────────

/// A bound content form of either kind, as it travels through view building.
#[derive(Debug, Clone)]
pub enum ContentForm {
    Create(Form<ContentCreateData>),
    Update(Form<ContentUpdateData>),
}

impl ContentForm {
    pub fn name(&self) -> &str {
        match self {
            ContentForm::Create(f) => f.name(),
            ContentForm::Update(f) => f.name(),
        }
    }

    pub fn options(&self) -> &FormOptions {
        match self {
            ContentForm::Create(f) => f.options(),
            ContentForm::Update(f) => f.options(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        match self {
            ContentForm::Create(f) => f.is_submitted(),
            ContentForm::Update(f) => f.is_submitted(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            ContentForm::Create(f) => f.is_valid(),
            ContentForm::Update(f) => f.is_valid(),
        }
    }

    pub fn clicked_button(&self) -> Option<&str> {
        match self {
            ContentForm::Create(f) => f.clicked_button(),
            ContentForm::Update(f) => f.clicked_button(),
        }
    }

    pub fn errors(&self) -> &[FormError] {
        match self {
            ContentForm::Create(f) => f.errors(),
            ContentForm::Update(f) => f.errors(),
        }
    }

    /// Bound data, serialized.
    pub fn data_json(&self) -> Result<Json, Error> {
        Ok(match self {
            ContentForm::Create(f) => serde_json::to_value(f.data())?,
            ContentForm::Update(f) => serde_json::to_value(f.data())?,
        })
    }

    pub fn create_view(&self) -> FormView {
        match self {
            ContentForm::Create(f) => f.create_view(),
            ContentForm::Update(f) => f.create_view(),
        }
    }

    pub fn handle_request(&mut self, input: &Json) -> &mut Self {
        match self {
            ContentForm::Create(f) => {
                f.handle_request(input);
            }
            ContentForm::Update(f) => {
                f.handle_request(input);
            }
        }
        self
    }
}

impl From<Form<ContentCreateData>> for ContentForm {
    fn from(f: Form<ContentCreateData>) -> Self {
        ContentForm::Create(f)
    }
}

impl From<Form<ContentUpdateData>> for ContentForm {
    fn from(f: Form<ContentUpdateData>) -> Self {
        ContentForm::Update(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_resolves_shape_defaults() {
        let form = Form::builder("value", FormShape::Keyword, Json::Null)
            .option("required", true)
            .auto_initialize(false)
            .build()
            .unwrap();

        assert_eq!(form.options().get_bool("required"), Some(true));
        assert_eq!(form.options().get("label"), Some(&Json::Null));
        assert!(!form.auto_initialize());
        assert!(!form.is_submitted());
        assert!(!form.is_valid());
    }

    #[test]
    fn builder_rejects_options_the_shape_does_not_know() {
        let err = Form::builder("value", FormShape::Keyword, Json::Null)
            .option("drafts_enabled", true)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UndefinedOption { .. }));
    }

    #[test]
    fn content_shapes_require_language_options() {
        let err = Form::builder("content_edit", FormShape::ContentEdit, Json::Null)
            .option("languageCode", "eng-GB")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingOption { ref option, .. } if option == "mainLanguageCode"));
    }

    #[test]
    fn add_replaces_child_with_same_name() {
        let mut parent = Form::builder("tags", FormShape::FieldValue, Json::Null)
            .build()
            .unwrap();
        let first = Form::builder("value", FormShape::Keyword, json!(["a"]))
            .build()
            .unwrap();
        let second = Form::builder("value", FormShape::Keyword, json!(["b"]))
            .build()
            .unwrap();

        parent.add(first).add(second);
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.get("value").unwrap().data(), &json!(["b"]));
    }

    #[test]
    fn keyword_view_renders_joined_string() {
        let form = Form::builder("value", FormShape::Keyword, json!(["a", "b"]))
            .build()
            .unwrap();
        let view = form.create_view();
        assert_eq!(view.value, json!("a, b"));
        assert!(view.buttons.is_empty());
    }
}
