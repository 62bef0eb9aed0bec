use crate::params::{ParamValue, RequestParameters, ViewRequest};
use crate::route::{Route, CONTROLLER_KEY};

/// Raised before a view builder runs; listeners may add parameters.
pub struct FilterViewBuilderParametersEvent<'a> {
    parameters: &'a mut RequestParameters,
    request: &'a ViewRequest,
}

impl<'a> FilterViewBuilderParametersEvent<'a> {
    pub fn new(parameters: &'a mut RequestParameters, request: &'a ViewRequest) -> Self {
        Self {
            parameters,
            request,
        }
    }

    pub fn parameters(&self) -> &RequestParameters {
        &*self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut RequestParameters {
        &mut *self.parameters
    }

    pub fn request(&self) -> &'a ViewRequest {
        self.request
    }

    pub fn controller(&self) -> Option<&str> {
        self.parameters.get(CONTROLLER_KEY).and_then(ParamValue::as_str)
    }

    pub fn route(&self) -> Option<Route> {
        self.controller().and_then(Route::from_controller)
    }
}
