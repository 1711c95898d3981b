//! Registry reading: export loading and section ordering.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::error::{DocsError, Result};
use crate::setting::{DefaultValue, Setting};

/// Order settings by section, keeping registry order within a section.
///
/// `sort_by` is stable, so settings sharing a section keep the relative order
/// they were declared in.
pub fn order_by_section<'a, I>(settings: I) -> Vec<&'a Setting>
where
    I: IntoIterator<Item = &'a Setting>,
{
    let mut ordered: Vec<&Setting> = settings.into_iter().collect();
    ordered.sort_by(|a, b| a.section.cmp(&b.section));
    ordered
}

/// A section and how many settings it holds, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub name: String,
    pub count: usize,
}

/// The known settings collection, as loaded from a registry export.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    settings: Vec<Setting>,
    origin: Option<PathBuf>,
}

/// Top-level shape of an export file: a list of settings, or a mapping
/// holding one under `settings`.
///
/// Visited directly rather than untagged so that errors inside a setting keep
/// the parser's location and field path.
struct ExportFile(Vec<Setting>);

impl<'de> Deserialize<'de> for ExportFile {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ExportVisitor)
    }
}

struct ExportVisitor;

impl<'de> Visitor<'de> for ExportVisitor {
    type Value = ExportFile;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of settings or a mapping with a `settings` list")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ExportFile, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut settings = Vec::new();
        while let Some(setting) = seq.next_element::<Setting>()? {
            settings.push(setting);
        }
        Ok(ExportFile(settings))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<ExportFile, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut settings = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "settings" {
                if settings.is_some() {
                    return Err(de::Error::duplicate_field("settings"));
                }
                settings = Some(map.next_value::<Vec<Setting>>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        settings
            .map(ExportFile)
            .ok_or_else(|| de::Error::missing_field("settings"))
    }
}

impl Registry {
    pub fn new(settings: Vec<Setting>) -> Self {
        Self {
            settings,
            origin: None,
        }
    }

    /// Load a YAML or JSON registry export.
    ///
    /// The top level is either a list of settings or a mapping with a
    /// `settings` list. Relative `file` paths of computed defaults are resolved
    /// against the export's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DocsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let export: ExportFile = match extension.as_deref() {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&contents).map_err(|e| DocsError::RegistryParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| DocsError::RegistryParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            _ => {
                return Err(DocsError::UnsupportedRegistry {
                    path: path.to_path_buf(),
                })
            }
        };

        let ExportFile(mut settings) = export;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        for setting in &mut settings {
            if let DefaultValue::Computed(computed) = &mut setting.default {
                if let Some(file) = &computed.file {
                    if file.is_relative() {
                        computed.file = Some(base_dir.join(file));
                    }
                }
            }
        }

        tracing::debug!(?path, count = settings.len(), "Loaded settings registry");

        Ok(Self {
            settings,
            origin: Some(path.to_path_buf()),
        })
    }

    /// Settings in registry (declaration) order.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// The export file this registry was loaded from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Settings in document order.
    pub fn ordered(&self) -> Vec<&Setting> {
        order_by_section(&self.settings)
    }

    /// Sections in document order with their setting counts.
    pub fn sections(&self) -> Vec<SectionSummary> {
        let mut summaries: Vec<SectionSummary> = Vec::new();
        for setting in self.ordered() {
            match summaries.last_mut() {
                Some(last) if last.name == setting.section => last.count += 1,
                _ => summaries.push(SectionSummary {
                    name: setting.section.clone(),
                    count: 1,
                }),
            }
        }
        summaries
    }
}

impl From<Vec<Setting>> for Registry {
    fn from(settings: Vec<Setting>) -> Self {
        Self::new(settings)
    }
}
