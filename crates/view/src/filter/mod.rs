pub mod create;
pub mod edit;

use crate::event::FilterViewBuilderParametersEvent;
use crate::Error;

pub use create::ContentCreateViewFilter;
pub use edit::ContentEditViewFilter;

/// Runs before a view builder and may add parameters for it.
///
/// Filters must leave the parameters untouched for routes they do not own.
pub trait ViewParametersFilter: Send + Sync {
    fn handle(&self, event: &mut FilterViewBuilderParametersEvent<'_>) -> Result<(), Error>;
}
