use crate::params::{ParamValue, RequestParameters};
use crate::view::{View, ViewParameters};
use serde_json::Value as Json;

/// Key whose JSON object is merged into the view parameters.
pub const CUSTOM_PARAMS_KEY: &str = "params";

/// Adds caller supplied parameters to a view.
pub trait ParametersInjector: Send + Sync {
    fn inject_view_parameters(&self, view: &mut dyn View, parameters: &RequestParameters);
}

/// Merges the `params` object of the raw parameters into the view.
#[derive(Debug, Default)]
pub struct CustomParametersInjector;

impl ParametersInjector for CustomParametersInjector {
    fn inject_view_parameters(&self, view: &mut dyn View, parameters: &RequestParameters) {
        if let Some(ParamValue::Json(Json::Object(custom))) = parameters.get(CUSTOM_PARAMS_KEY) {
            let extra: ViewParameters = custom
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            view.add_parameters(extra);
        }
    }
}
