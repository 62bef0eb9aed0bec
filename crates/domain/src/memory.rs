// crates/domain/src/memory.rs

use crate::content::{Content, ContentType, Language, Location};
use crate::repository::{
    ContentService, ContentTypeService, LanguageService, LocationService, Repository, Result,
};
use crate::Error;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Fixture format
// ─────────────────────────────────────────────────────────────────────────────

/// Read permissions for the fixture; anything listed here is denied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessFixture {
    #[serde(default)]
    pub denied_locations: BTreeSet<i64>,
    #[serde(default)]
    pub denied_contents: BTreeSet<i64>,
}

/// Whole repository as it appears in a TOML fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryFixture {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub access: AccessFixture,
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory repository
// ─────────────────────────────────────────────────────────────────────────────

/// Simple in-memory repository.
///
/// This is primarily a reference implementation and is also useful for tests
/// and for the command-line front end.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    fixture: RepositoryFixture,
}

impl InMemoryRepository {
    pub fn new(fixture: RepositoryFixture) -> Self {
        Self { fixture }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let fixture: RepositoryFixture = toml::from_str(raw)?;
        Self::check(&fixture)?;
        Ok(Self::new(fixture))
    }

    #[tracing::instrument(skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        debug!("loaded repository fixture from {}", path.as_ref().display());
        Self::from_toml_str(&raw)
    }

    pub fn fixture(&self) -> &RepositoryFixture {
        &self.fixture
    }

    /// Content versions must be unique per (id, version).
    fn check(fixture: &RepositoryFixture) -> Result<()> {
        let mut seen = BTreeSet::new();
        for c in &fixture.contents {
            if !seen.insert((c.id(), c.version_no())) {
                return Err(Error::Fixture(format!(
                    "content {} has version {} more than once",
                    c.id(),
                    c.version_no()
                )));
            }
        }
        Ok(())
    }
}

impl LocationService for InMemoryRepository {
    fn load_location(&self, location_id: i64) -> Result<Location> {
        let location = self
            .fixture
            .locations
            .iter()
            .find(|l| l.id == location_id)
            .ok_or_else(|| Error::not_found("Location", location_id))?;

        if self.fixture.access.denied_locations.contains(&location_id) {
            return Err(Error::unauthorized("Location", location_id));
        }

        Ok(location.clone())
    }
}

impl LanguageService for InMemoryRepository {
    fn load_language(&self, language_code: &str) -> Result<Language> {
        self.fixture
            .languages
            .iter()
            .find(|l| l.language_code == language_code)
            .cloned()
            .ok_or_else(|| Error::not_found("Language", language_code))
    }
}

impl ContentTypeService for InMemoryRepository {
    fn load_content_type_by_identifier(
        &self,
        identifier: &str,
        prioritized_languages: &[String],
    ) -> Result<ContentType> {
        debug!(identifier, ?prioritized_languages, "loading content type");
        self.fixture
            .content_types
            .iter()
            .find(|ct| ct.identifier == identifier)
            .cloned()
            .ok_or_else(|| Error::not_found("ContentType", identifier))
    }

    fn load_content_type(&self, content_type_id: i64) -> Result<ContentType> {
        self.fixture
            .content_types
            .iter()
            .find(|ct| ct.id == content_type_id)
            .cloned()
            .ok_or_else(|| Error::not_found("ContentType", content_type_id))
    }
}

impl ContentService for InMemoryRepository {
    fn load_content(
        &self,
        content_id: i64,
        languages: Option<&[String]>,
        version_no: Option<u32>,
    ) -> Result<Content> {
        let content = self
            .fixture
            .contents
            .iter()
            .filter(|c| c.id() == content_id)
            .filter(|c| version_no.map_or(true, |v| c.version_no() == v))
            .max_by_key(|c| c.version_no())
            .ok_or_else(|| Error::not_found("Content", content_id))?;

        if self.fixture.access.denied_contents.contains(&content_id) {
            return Err(Error::unauthorized("Content", content_id));
        }

        if let Some(langs) = languages {
            if !langs.is_empty() && !langs.iter().any(|l| content.has_language(l)) {
                return Err(Error::not_found(
                    "Content",
                    format!("{content_id} in {}", langs.join(",")),
                ));
            }
        }

        Ok(content.clone())
    }
}

impl Repository for InMemoryRepository {
    fn location_service(&self) -> &dyn LocationService {
        self
    }

    fn language_service(&self) -> &dyn LanguageService {
        self
    }

    fn content_type_service(&self) -> &dyn ContentTypeService {
        self
    }

    fn content_service(&self) -> &dyn ContentService {
        self
    }
}
