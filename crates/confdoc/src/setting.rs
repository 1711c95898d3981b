//! Setting descriptors as exported by the configuration registry.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::literal::Literal;

/// Metadata for a single configuration option.
///
/// Only `name` is required in a registry export; every other field falls back
/// to "not present" (`cli`/`meta`/`desc`) or to a `None` default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Setting {
    /// Identifier used in configuration files (e.g. `worker_connections`).
    pub name: String,

    /// Human-readable grouping label (e.g. "Worker Processes").
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,

    /// Command-line spellings, in display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cli: Vec<String>,

    /// Argument placeholder shown after each flag (e.g. `INT`).
    #[serde(default)]
    pub meta: Option<String>,

    #[serde(default)]
    pub default: DefaultValue,

    /// Description in reStructuredText, emitted verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            cli: Vec::new(),
            meta: None,
            default: DefaultValue::default(),
            desc: String::new(),
        }
    }

    pub fn with_cli<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cli = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Cross-reference label: the name with underscores turned into hyphens.
    pub fn anchor(&self) -> String {
        self.name.replace('_', "-")
    }

    /// The argument placeholder, treating an empty string as absent.
    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref().filter(|m| !m.is_empty())
    }
}

/// Explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A setting's default: either a static value or a routine evaluated at read time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDefault")]
pub enum DefaultValue {
    Literal(Literal),
    Computed(ComputedDefault),
}

impl Default for DefaultValue {
    fn default() -> Self {
        DefaultValue::Literal(Literal::None)
    }
}

impl From<Literal> for DefaultValue {
    fn from(value: Literal) -> Self {
        DefaultValue::Literal(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Literal(value.into())
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Literal(value.into())
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Literal(value.into())
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Literal(value.into())
    }
}

impl From<ComputedDefault> for DefaultValue {
    fn from(value: ComputedDefault) -> Self {
        DefaultValue::Computed(value)
    }
}

/// A default computed by a routine; the reference shows the routine's source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComputedDefault {
    /// Name of the routine (e.g. `default_workers`, `on_starting`).
    pub routine: String,

    /// Source text supplied inline by the registry export.
    #[serde(default)]
    pub source: Option<String>,

    /// File that defines the routine; resolved relative to the registry export.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl ComputedDefault {
    pub fn inline(routine: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            routine: routine.into(),
            source: Some(source.into()),
            file: None,
        }
    }

    pub fn in_file(routine: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            routine: routine.into(),
            source: None,
            file: Some(file.into()),
        }
    }
}

/// Wire shape of `default`: `{computed: {...}}` or any literal value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Computed(ComputedWrapper),
    Literal(Literal),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ComputedWrapper {
    computed: ComputedDefault,
}

impl From<RawDefault> for DefaultValue {
    fn from(raw: RawDefault) -> Self {
        match raw {
            RawDefault::Computed(wrapper) => DefaultValue::Computed(wrapper.computed),
            RawDefault::Literal(literal) => DefaultValue::Literal(literal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_replaces_underscores() {
        let setting = Setting::new("worker_tmp_dir", "Server Mechanics");
        assert_eq!(setting.anchor(), "worker-tmp-dir");
        assert_eq!(Setting::new("bind", "Server Socket").anchor(), "bind");
    }

    #[test]
    fn test_empty_meta_is_absent() {
        let setting = Setting::new("reload", "Debugging").with_meta("");
        assert_eq!(setting.meta(), None);
        let setting = setting.with_meta("INT");
        assert_eq!(setting.meta(), Some("INT"));
    }

    #[test]
    fn test_parse_minimal_setting() {
        let setting: Setting = serde_yaml::from_str("name: chdir").unwrap();
        assert_eq!(setting.name, "chdir");
        assert!(setting.section.is_empty());
        assert!(setting.cli.is_empty());
        assert!(setting.meta.is_none());
        assert_eq!(setting.default, DefaultValue::Literal(Literal::None));
        assert!(setting.desc.is_empty());
    }

    #[test]
    fn test_parse_literal_defaults() {
        let yaml = r#"
name: backlog
section: Server Socket
cli: ["--backlog"]
meta: INT
default: 2048
desc: The maximum number of pending connections.
"#;
        let setting: Setting = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(setting.cli, vec!["--backlog"]);
        assert_eq!(setting.default, DefaultValue::Literal(Literal::Int(2048)));

        let setting: Setting = serde_yaml::from_str("name: proc_name\ndefault: null").unwrap();
        assert_eq!(setting.default, DefaultValue::Literal(Literal::None));

        let setting: Setting = serde_yaml::from_str("name: umask\ndefault: ''").unwrap();
        assert!(matches!(setting.default, DefaultValue::Literal(ref l) if l.is_empty_str()));
    }

    #[test]
    fn test_parse_computed_default() {
        let yaml = r#"
name: on_starting
section: Server Hooks
default:
  computed:
    routine: on_starting
    source: |
      def on_starting(server):
          pass
"#;
        let setting: Setting = serde_yaml::from_str(yaml).unwrap();
        match setting.default {
            DefaultValue::Computed(computed) => {
                assert_eq!(computed.routine, "on_starting");
                assert_eq!(
                    computed.source.as_deref(),
                    Some("def on_starting(server):\n    pass\n")
                );
                assert!(computed.file.is_none());
            }
            other => panic!("expected computed default, got {other:?}"),
        }
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let json = r#"{"name": "on_starting", "section": null, "cli": null, "meta": null, "default": null, "desc": null}"#;
        let setting: Setting = serde_json::from_str(json).unwrap();
        assert!(setting.section.is_empty());
        assert!(setting.cli.is_empty());
        assert!(setting.meta.is_none());
        assert_eq!(setting.default, DefaultValue::Literal(Literal::None));
        assert!(setting.desc.is_empty());
    }

    #[test]
    fn test_dict_with_extra_keys_stays_literal() {
        let yaml = "name: headers\ndefault: {computed: x, other: 1}";
        let setting: Setting = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            setting.default,
            DefaultValue::Literal(Literal::Dict(_))
        ));
    }
}
