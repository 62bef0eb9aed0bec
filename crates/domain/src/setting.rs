use crate::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Template for the content create screen.
    pub content_create: String,

    /// Template for the content edit screen.
    pub content_edit: String,

    /// Per content-type identifier overrides, applied to both screens.
    pub overrides: BTreeMap<String, String>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            content_create: "content/create.hbs".into(),
            content_edit: "content/edit.hbs".into(),
            overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Redirect target after a successful publish; `{location_id}` is replaced.
    pub publish_redirect: String,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            publish_redirect: "/view/content/{location_id}".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub templates: TemplateSettings,
    pub actions: ActionSettings,
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, Error> {
        Ok(toml::from_str(raw)?)
    }

    /// Load settings from a TOML file. Missing sections fall back to defaults.
    #[tracing::instrument(skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s.templates.content_create, "content/create.hbs");
        assert_eq!(s.templates.content_edit, "content/edit.hbs");
        assert!(s.templates.overrides.is_empty());
        assert_eq!(s.actions.publish_redirect, "/view/content/{location_id}");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = r#"
[templates]
content_create = "admin/create.hbs"

[templates.overrides]
article = "admin/article_form.hbs"
"#;
        let s = Settings::from_toml_str(raw).unwrap();
        assert_eq!(s.templates.content_create, "admin/create.hbs");
        assert_eq!(s.templates.content_edit, "content/edit.hbs");
        assert_eq!(
            s.templates.overrides.get("article").map(String::as_str),
            Some("admin/article_form.hbs")
        );
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[templates\ncontent_create = 1").unwrap();
        assert!(matches!(Settings::from_path(file.path()), Err(Error::Toml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = Settings::from_path(dir.path().join("nope.toml"));
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
