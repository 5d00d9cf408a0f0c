//! Registry of popular style guides.
//!
//! Guides are authoritative: resolving one yields its fragment verbatim and
//! no rule inference is merged on top.

use crate::error::SynthesisError;
use crate::models::ConfigFragment;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleGuide {
    Google,
    Airbnb,
    Standard,
}

impl StyleGuide {
    pub const ALL: [StyleGuide; 3] = [StyleGuide::Google, StyleGuide::Airbnb, StyleGuide::Standard];

    pub fn name(self) -> &'static str {
        match self {
            StyleGuide::Google => "google",
            StyleGuide::Airbnb => "airbnb",
            StyleGuide::Standard => "standard",
        }
    }

    /// Configuration fragment contributed by the guide.
    pub fn fragment(self) -> ConfigFragment {
        let mut frag = ConfigFragment::extending(self.name());
        match self {
            StyleGuide::Google => {}
            StyleGuide::Airbnb => frag.add_plugin("react"),
            StyleGuide::Standard => frag.add_plugin("standard"),
        }
        frag
    }
}

impl fmt::Display for StyleGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleGuide {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleGuide::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| SynthesisError::UnsupportedStyleGuide {
                name: s.to_string(),
            })
    }
}

/// Look up a guide by name and return its fragment.
pub fn resolve(name: &str) -> Result<ConfigFragment, SynthesisError> {
    let guide: StyleGuide = name.parse()?;
    Ok(guide.fragment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_google_only_extends() {
        let frag = resolve("google").unwrap();
        assert_eq!(serde_json::to_value(&frag).unwrap(), json!({"extends": "google"}));
    }

    #[test]
    fn test_airbnb_adds_react_plugin() {
        let frag = resolve("airbnb").unwrap();
        assert_eq!(
            serde_json::to_value(&frag).unwrap(),
            json!({"extends": "airbnb", "plugins": ["react"]})
        );
    }

    #[test]
    fn test_standard_adds_same_named_plugin() {
        let frag = resolve("standard").unwrap();
        assert_eq!(
            serde_json::to_value(&frag).unwrap(),
            json!({"extends": "standard", "plugins": ["standard"]})
        );
    }

    #[test]
    fn test_unknown_guide_is_rejected_with_name() {
        let err = resolve("non-standard").unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnsupportedStyleGuide {
                name: "non-standard".into()
            }
        );
        assert!(err.to_string().contains("non-standard"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(resolve("Google").is_err());
    }
}
