//! Configuration fragments and rule settings.
//!
//! A `ConfigFragment` is a partial lint configuration. Fragments merge
//! key-by-key with right-hand precedence for `rules`, `env` and
//! `parserOptions.ecmaFeatures`; `plugins` are concatenated and deduplicated
//! keeping first occurrence order.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Baseline ruleset extended by every inferred configuration.
pub const RECOMMENDED: &str = "eslint:recommended";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Rule enforcement level.
pub enum Severity {
    Off = 0,
    Warn = 1,
    Error = 2,
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Value of one entry under `rules`: a bare severity or `[severity, options...]`.
pub enum RuleSetting {
    Level(Severity),
    WithOptions(Severity, Vec<Json>),
}

impl RuleSetting {
    /// `[2, option]`
    pub fn error(option: impl Into<Json>) -> Self {
        RuleSetting::WithOptions(Severity::Error, vec![option.into()])
    }

    pub fn off() -> Self {
        RuleSetting::Level(Severity::Off)
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleSetting::Level(s) | RuleSetting::WithOptions(s, _) => *s,
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleSetting::Level(sev) => sev.serialize(serializer),
            RuleSetting::WithOptions(sev, opts) => {
                let mut seq = serializer.serialize_seq(Some(opts.len() + 1))?;
                seq.serialize_element(sev)?;
                for o in opts {
                    seq.serialize_element(o)?;
                }
                seq.end()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ecma_features: BTreeMap<String, bool>,
}

impl ParserOptions {
    pub fn is_empty(&self) -> bool {
        self.ecma_features.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Partial (or final) lint configuration. Empty sections are not serialized.
pub struct ConfigFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "ParserOptions::is_empty")]
    pub parser_options: ParserOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleSetting>,
}

/// The merged configuration handed back to callers.
pub type FinalConfig = ConfigFragment;

impl ConfigFragment {
    /// Fragment that only extends `target`.
    pub fn extending(target: impl Into<String>) -> Self {
        ConfigFragment {
            extends: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn set_rule(&mut self, name: &str, setting: RuleSetting) {
        self.rules.insert(name.to_string(), setting);
    }

    pub fn enable_env(&mut self, name: &str) {
        self.env.insert(name.to_string(), true);
    }

    pub fn enable_feature(&mut self, name: &str) {
        self.parser_options
            .ecma_features
            .insert(name.to_string(), true);
    }

    /// Append a plugin unless it is already listed.
    pub fn add_plugin(&mut self, name: &str) {
        if !self.plugins.iter().any(|p| p == name) {
            self.plugins.push(name.to_string());
        }
    }

    /// Merge `other` into `self`; `other` wins on conflicting keys.
    ///
    /// `extends` is taken from `other` only when it sets one, so merging an
    /// environment-only fragment never drops the baseline.
    pub fn merge(mut self, other: ConfigFragment) -> ConfigFragment {
        if other.extends.is_some() {
            self.extends = other.extends;
        }
        self.env.extend(other.env);
        self.parser_options
            .ecma_features
            .extend(other.parser_options.ecma_features);
        for p in &other.plugins {
            self.add_plugin(p);
        }
        self.rules.extend(other.rules);
        self
    }
}
