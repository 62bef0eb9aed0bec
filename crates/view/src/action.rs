// crates/view/src/action.rs

//! Form action dispatch.
//!
//! When a valid form was submitted through one of its buttons, the builder
//! hands it to an `ActionDispatcher`. A dispatcher may answer with a response
//! (typically a redirect). Dispatchers are shared by every request, so the
//! response travels back as the return value and never through `self`.

use crate::Error;
use domain::Location;
use forms::ContentForm;
use http::header::LOCATION;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::{json, Value as Json};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    pub referrer_location: Option<Location>,
}

/// Response produced by an action; the host sends it instead of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl ActionResponse {
    pub fn redirect(target: &str) -> Result<Self, Error> {
        let value = HeaderValue::from_str(target)
            .map_err(|_| Error::InvalidHeaderValue(target.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, value);

        Ok(Self {
            status: StatusCode::FOUND,
            headers,
            body: None,
        })
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn to_json(&self) -> Json {
        let headers: serde_json::Map<String, Json> = self
            .headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), json!(v))))
            .collect();
        json!({
            "status": self.status.as_u16(),
            "headers": headers,
            "body": self.body,
        })
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ActionDispatcher: Send + Sync {
    fn dispatch_form_action(
        &self,
        form: &ContentForm,
        data: &Json,
        action_name: &str,
        context: &ActionContext,
    ) -> Result<Option<ActionResponse>, Error>;
}

/// Dispatcher that never produces a response.
#[derive(Debug, Default)]
pub struct NullActionDispatcher;

impl ActionDispatcher for NullActionDispatcher {
    fn dispatch_form_action(
        &self,
        form: &ContentForm,
        _data: &Json,
        action_name: &str,
        _context: &ActionContext,
    ) -> Result<Option<ActionResponse>, Error> {
        debug!(form = form.name(), action_name, "action ignored");
        Ok(None)
    }
}

/// Redirects to the referrer location on `publish` and `cancel`.
///
/// `saveDraft` stays on the form. The redirect target is a pattern where
/// `{location_id}` is replaced by the referrer location's id.
#[derive(Debug, Clone)]
pub struct RedirectOnPublishDispatcher {
    target_pattern: String,
}

impl RedirectOnPublishDispatcher {
    pub fn new(target_pattern: impl Into<String>) -> Self {
        Self {
            target_pattern: target_pattern.into(),
        }
    }
}

impl ActionDispatcher for RedirectOnPublishDispatcher {
    #[tracing::instrument(skip_all, fields(action = action_name))]
    fn dispatch_form_action(
        &self,
        form: &ContentForm,
        _data: &Json,
        action_name: &str,
        context: &ActionContext,
    ) -> Result<Option<ActionResponse>, Error> {
        match (action_name, &context.referrer_location) {
            ("publish" | "cancel", Some(location)) => {
                let target = self
                    .target_pattern
                    .replace("{location_id}", &location.id.to_string());
                info!(form = form.name(), %target, "redirecting after action");
                Ok(Some(ActionResponse::redirect(&target)?))
            }
            _ => Ok(None),
        }
    }
}
