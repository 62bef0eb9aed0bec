// crates/domain/src/repository.rs

//! Repository service ports.
//!
//! View building only ever *reads* from the repository. Every call is a
//! single blocking lookup: implementations decide about caching, retries and
//! permission checks, callers never do.

use crate::content::{Content, ContentType, Language, Location};
use crate::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub trait LocationService: Send + Sync {
    /// Fails with `NotFound` or `Unauthorized`.
    fn load_location(&self, location_id: i64) -> Result<Location>;
}

pub trait LanguageService: Send + Sync {
    fn load_language(&self, language_code: &str) -> Result<Language>;
}

pub trait ContentTypeService: Send + Sync {
    /// `prioritized_languages` only affects which translated names the
    /// returned type carries first; it never changes which type is found.
    fn load_content_type_by_identifier(
        &self,
        identifier: &str,
        prioritized_languages: &[String],
    ) -> Result<ContentType>;

    fn load_content_type(&self, content_type_id: i64) -> Result<ContentType>;
}

pub trait ContentService: Send + Sync {
    /// Loads a version of a content item.
    ///
    /// - `languages`: when given, the version must contain one of them.
    /// - `version_no`: `None` loads the newest version.
    fn load_content(
        &self,
        content_id: i64,
        languages: Option<&[String]>,
        version_no: Option<u32>,
    ) -> Result<Content>;
}

/// Aggregate access to all services, mirroring a repository handle.
pub trait Repository: Send + Sync {
    fn location_service(&self) -> &dyn LocationService;
    fn language_service(&self) -> &dyn LanguageService;
    fn content_type_service(&self) -> &dyn ContentTypeService;
    fn content_service(&self) -> &dyn ContentService;
}
