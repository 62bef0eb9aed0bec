pub mod action;
pub mod builder;
pub mod configurator;
pub mod event;
pub mod filter;
pub mod injector;
pub mod params;
pub mod pipeline;
pub mod resolve;
pub mod route;
pub mod view;

mod error;

pub use action::{
    ActionContext, ActionDispatcher, ActionResponse, NullActionDispatcher,
    RedirectOnPublishDispatcher,
};
pub use builder::{ContentCreateViewBuilder, ContentEditViewBuilder, ViewBuilder};
pub use configurator::{TemplateConfigurator, ViewConfigurator};
pub use error::Error;
pub use event::FilterViewBuilderParametersEvent;
pub use filter::{ContentCreateViewFilter, ContentEditViewFilter, ViewParametersFilter};
pub use injector::{CustomParametersInjector, ParametersInjector};
pub use params::{ParamValue, RequestParameters, ViewRequest};
pub use pipeline::ViewPipeline;
pub use resolve::{
    resolve_content_type, resolve_context, resolve_language, resolve_parent_location,
    ResolvedContext,
};
pub use route::Route;
pub use view::{
    ContentCreateSuccessView, ContentCreateView, ContentEditView, View, ViewParameters, ViewResult,
};
