pub mod create;
pub mod edit;

use crate::params::RequestParameters;
use crate::route::Route;
use crate::view::ViewResult;
use crate::Error;

pub use create::ContentCreateViewBuilder;
pub use edit::ContentEditViewBuilder;

/// Turns resolved request parameters into a view.
pub trait ViewBuilder: Send + Sync {
    fn matches(&self, route: Route) -> bool;
    fn build_view(&self, parameters: &RequestParameters) -> Result<ViewResult, Error>;
}

/// The bound form every builder expects under `form`.
pub(crate) fn require_form(
    parameters: &RequestParameters,
) -> Result<&forms::ContentForm, Error> {
    parameters.form().ok_or(Error::MissingParameter {
        name: "form",
        reason: "No form was attached to the view parameters",
    })
}
