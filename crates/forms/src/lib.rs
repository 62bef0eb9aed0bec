pub mod constraint;
pub mod data;
pub mod factory;
pub mod form;
pub mod keyword;
pub mod mapper;
pub mod options;

mod error;

pub use constraint::FieldSettingsConstraint;
pub use data::{
    ContentCreateData, ContentCreateMapper, ContentUpdateData, ContentUpdateMapper, FieldData,
    FormData,
};
pub use error::Error;
pub use factory::{DefaultFormFactory, FormFactory};
pub use form::{ContentForm, Form, FormError, FormShape, FormView};
pub use mapper::{FieldMapperRegistry, FieldValueFormMapper, KeywordFormMapper};
pub use options::{FormOptions, OptionsResolver};
