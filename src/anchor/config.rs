use crate::anchor::extend::Extender;
use crate::anchor::policy::{Attributes, Position, Text};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serialisable anchor settings.
///
/// Every field is optional. A missing `attributes` key keeps the default
/// `class="anchor"`, while `attributes: {}` removes all attributes.
///
/// ```yaml
/// text: "#"
/// position: before
/// attributes:
///   class: permalink
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,

    #[serde(rename = "unsafe")]
    pub unsafe_text: bool,
}

impl AnchorConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a config file. `.json` files are parsed as JSON, anything else as
    /// YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading anchor config");
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }
}

impl From<AnchorConfig> for Extender {
    fn from(cfg: AnchorConfig) -> Self {
        let mut ext = Extender::new()
            .position(cfg.position.unwrap_or_default())
            .unsafe_text(cfg.unsafe_text);
        if let Some(text) = cfg.text {
            ext = ext.texter(Text::new(text));
        }
        if let Some(attrs) = cfg.attributes {
            ext = ext.attributer(Attributes::from(attrs));
        }
        ext
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_yaml_is_default() {
        let cfg = AnchorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, AnchorConfig::default());
    }

    #[test]
    fn reads_yaml() {
        let cfg = AnchorConfig::from_yaml_str(
            "text: '#'\nposition: Before\nattributes:\n  class: permalink\nunsafe: true\n",
        )
        .unwrap();
        assert_eq!(cfg.text.as_deref(), Some("#"));
        assert_eq!(cfg.position, Some(Position::Before));
        assert_eq!(
            cfg.attributes.unwrap().get("class").map(String::as_str),
            Some("permalink")
        );
        assert!(cfg.unsafe_text);
    }

    #[test]
    fn empty_attributes_are_kept_distinct_from_missing() {
        let cfg = AnchorConfig::from_json_str(r#"{"attributes": {}}"#).unwrap();
        assert_eq!(cfg.attributes, Some(BTreeMap::new()));
    }

    #[test]
    fn integer_positions() {
        let cfg = AnchorConfig::from_json_str(r#"{"position": 1}"#).unwrap();
        assert_eq!(cfg.position, Some(Position::Before));
        let cfg = AnchorConfig::from_json_str(r#"{"position": 42}"#).unwrap();
        assert_eq!(cfg.position, Some(Position::After));
    }

    #[test]
    fn bad_position_is_an_error() {
        let err = AnchorConfig::from_yaml_str("position: middle").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
        assert!(err.to_string().contains("invalid anchor position"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AnchorConfig::from_json_str(r##"{"txt": "#"}"##).is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();

        let json = dir.join("anchor.json");
        fs::write(&json, r#"{"text": "§"}"#).unwrap();
        assert_eq!(AnchorConfig::load(&json).unwrap().text.as_deref(), Some("§"));

        let yaml = dir.join("anchor.yaml");
        fs::write(&yaml, "position: before\n").unwrap();
        assert_eq!(
            AnchorConfig::load(&yaml).unwrap().position,
            Some(Position::Before)
        );

        assert!(matches!(
            AnchorConfig::load(dir.join("missing.yaml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn serializes_only_set_fields() {
        let cfg = AnchorConfig {
            position: Some(Position::Before),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&cfg).unwrap(),
            r#"{"position":"before","unsafe":false}"#
        );
    }
}
