// crates/forms/src/options.rs

use crate::Error;
use serde::Serialize;
use serde_json::Value as Json;
use std::collections::{BTreeMap, BTreeSet};

/// Options passed to a form when it is built (`languageCode`, `label`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormOptions(BTreeMap<String, Json>);

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Json>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Json>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Json> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Json::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.0.get(name).and_then(Json::as_bool)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Json)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Json>> FromIterator<(K, V)> for FormOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Declares which options a form accepts, which are required, and defaults.
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    defined: BTreeSet<String>,
    required: BTreeSet<String>,
    defaults: BTreeMap<String, Json>,
}

impl OptionsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_defined<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defined.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn set_required<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            self.defined.insert(name.clone());
            self.required.insert(name);
        }
        self
    }

    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<Json>) -> &mut Self {
        let name = name.into();
        self.defined.insert(name.clone());
        self.defaults.insert(name, value.into());
        self
    }

    pub fn set_defaults<I, K, V>(&mut self, defaults: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Json>,
    {
        for (k, v) in defaults {
            self.set_default(k, v);
        }
        self
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    pub fn default_value(&self, name: &str) -> Option<&Json> {
        self.defaults.get(name)
    }

    /// Merge `options` over the defaults.
    ///
    /// Fails on options nobody declared and on required options that are
    /// still absent after defaults are applied.
    pub fn resolve(&self, form: &str, options: FormOptions) -> Result<FormOptions, Error> {
        if let Some((name, _)) = options.iter().find(|(k, _)| !self.defined.contains(*k)) {
            return Err(Error::UndefinedOption {
                form: form.to_string(),
                option: name.clone(),
            });
        }

        let mut resolved = self.defaults.clone();
        resolved.extend(options.0);

        if let Some(missing) = self.required.iter().find(|r| !resolved.contains_key(*r)) {
            return Err(Error::MissingOption {
                form: form.to_string(),
                option: missing.clone(),
            });
        }

        Ok(FormOptions(resolved))
    }
}
