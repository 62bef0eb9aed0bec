// crates/view/src/resolve.rs

//! Resolution of request parameters into repository objects.
//!
//! Each value may arrive under several keys. Keys are tried in the order
//! listed in the `*_KEYS` constants; the first key that is set decides, and a
//! value that is set but unusable is an error rather than a fall-through.
//! Nothing is ever defaulted.

use crate::params::{ParamValue, RequestParameters};
use crate::Error;
use domain::{ContentType, Language, Location, Repository};
use domain::{ContentTypeService, LanguageService, LocationService};
use tracing::debug;

pub const LANGUAGE_KEYS: [&str; 2] = ["languageCode", "language"];
pub const PARENT_LOCATION_KEYS: [&str; 2] = ["parentLocation", "parentLocationId"];
pub const CONTENT_TYPE_KEYS: [&str; 2] = ["contentType", "contentTypeIdentifier"];

/// Everything needed to build a content create form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub language: Language,
    pub content_type: ContentType,
    pub parent_location: Location,
}

pub fn resolve_language(
    parameters: &RequestParameters,
    languages: &dyn LanguageService,
) -> Result<Language, Error> {
    if let Some(value) = parameters.get("languageCode") {
        let code = value.as_str().ok_or_else(|| {
            Error::invalid_parameter("languageCode", format!("expected a string, got {}", value.kind()))
        })?;
        debug!(code, "loading language from languageCode");
        return Ok(languages.load_language(code)?);
    }

    match parameters.get("language") {
        Some(ParamValue::Language(language)) => Ok(language.clone()),
        Some(value) => {
            let code = value.as_str().ok_or_else(|| {
                Error::invalid_parameter("language", format!("expected a language, got {}", value.kind()))
            })?;
            debug!(code, "loading language from legacy language key");
            Ok(languages.load_language(code)?)
        }
        None => Err(Error::MissingParameter {
            name: "Language",
            reason: "No language information provided. Are you missing language or languageCode parameters",
        }),
    }
}

pub fn resolve_parent_location(
    parameters: &RequestParameters,
    locations: &dyn LocationService,
) -> Result<Location, Error> {
    match parameters.get("parentLocation") {
        Some(ParamValue::Location(location)) => return Ok(location.clone()),
        Some(value) => {
            return Err(Error::invalid_parameter(
                "parentLocation",
                format!("expected a location, got {}", value.kind()),
            ))
        }
        None => {}
    }

    if let Some(value) = parameters.get("parentLocationId") {
        let id = value.as_int().ok_or_else(|| {
            Error::invalid_parameter("parentLocationId", format!("expected an integer, got {}", value.kind()))
        })?;
        debug!(id, "loading parent location");
        return Ok(locations.load_location(id)?);
    }

    Err(Error::MissingParameter {
        name: "ParentLocation",
        reason: "Unable to load parent location from parameters",
    })
}

/// Identifier lookups prioritize `language`'s translations.
pub fn resolve_content_type(
    parameters: &RequestParameters,
    language: &Language,
    content_types: &dyn ContentTypeService,
) -> Result<ContentType, Error> {
    match parameters.get("contentType") {
        Some(ParamValue::ContentType(content_type)) => return Ok(content_type.clone()),
        Some(value) => {
            return Err(Error::invalid_parameter(
                "contentType",
                format!("expected a content type, got {}", value.kind()),
            ))
        }
        None => {}
    }

    if let Some(value) = parameters.get("contentTypeIdentifier") {
        let identifier = value.as_str().ok_or_else(|| {
            Error::invalid_parameter(
                "contentTypeIdentifier",
                format!("expected a string, got {}", value.kind()),
            )
        })?;
        debug!(identifier, "loading content type");
        return Ok(content_types.load_content_type_by_identifier(
            identifier,
            &[language.language_code.clone()],
        )?);
    }

    Err(Error::MissingParameter {
        name: "ContentType",
        reason: "No content type could be loaded from parameters",
    })
}

/// Language first, then parent location, then content type.
#[tracing::instrument(skip_all)]
pub fn resolve_context(
    parameters: &RequestParameters,
    repository: &dyn Repository,
) -> Result<ResolvedContext, Error> {
    let language = resolve_language(parameters, repository.language_service())?;
    let parent_location = resolve_parent_location(parameters, repository.location_service())?;
    let content_type =
        resolve_content_type(parameters, &language, repository.content_type_service())?;

    Ok(ResolvedContext {
        language,
        content_type,
        parent_location,
    })
}
