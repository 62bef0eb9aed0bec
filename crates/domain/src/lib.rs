pub mod content;
pub mod memory;
pub mod repository;
pub mod setting;

mod error;

pub use content::{
    Content, ContentInfo, ContentType, Field, FieldDefinition, Language, Location, VersionInfo,
    VersionStatus,
};
pub use error::Error;
pub use memory::InMemoryRepository;
pub use repository::{
    ContentService, ContentTypeService, LanguageService, LocationService, Repository,
};
pub use setting::{ActionSettings, Settings, TemplateSettings};
