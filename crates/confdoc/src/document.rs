//! Document assembly: preamble + formatted settings, written atomically.

use std::io::Write;
use std::path::Path;

use askama::Template;
use serde::Deserialize;

use crate::error::{DocsError, Result};
use crate::format::SettingFormatter;
use crate::registry::order_by_section;
use crate::setting::Setting;

/// File name of the generated reference inside the documentation source dir.
pub const SETTINGS_FILENAME: &str = "settings.rst";

/// Values substituted into the fixed introductory text of the reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Preamble {
    /// Project name used in the introduction.
    pub project: String,
    /// Where the settings are really defined (the generated file must not be edited).
    pub source_hint: String,
    /// Environment variable whose value is parsed as extra command-line flags.
    pub env_var: String,
    /// Executable name used in the usage example.
    pub binary: String,
    /// Flags shown in the usage example.
    pub example_args: String,
    /// Application argument shown in the usage example.
    pub app: String,
    /// Release that introduced the environment variable, if worth noting.
    pub version_added: Option<String>,
}

impl Default for Preamble {
    fn default() -> Self {
        Self {
            project: "Gunicorn".to_string(),
            source_hint: "gunicorn/config.py".to_string(),
            env_var: "GUNICORN_CMD_ARGS".to_string(),
            binary: "gunicorn".to_string(),
            example_args: "--bind=127.0.0.1 --workers=3".to_string(),
            app: "app:app".to_string(),
            version_added: Some("19.7".to_string()),
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "settings-preamble.rst", escape = "none")]
struct PreambleTemplate<'a> {
    project: &'a str,
    source_hint: &'a str,
    env_var: &'a str,
    binary: &'a str,
    example_args: &'a str,
    app: &'a str,
    version_added: Option<&'a str>,
}

impl Preamble {
    /// Render the preamble; the result always ends with exactly one blank line.
    pub fn render(&self) -> Result<String> {
        let template = PreambleTemplate {
            project: &self.project,
            source_hint: &self.source_hint,
            env_var: &self.env_var,
            binary: &self.binary,
            example_args: &self.example_args,
            app: &self.app,
            version_added: self.version_added.as_deref(),
        };
        let rendered = template
            .render()
            .map_err(|e| DocsError::Rendering(e.to_string()))?;

        let mut out = rendered.trim_end().to_string();
        out.push_str("\n\n");
        Ok(out)
    }
}

/// Assembles and writes the settings reference.
#[derive(Debug, Clone, Default)]
pub struct SettingsDocument {
    preamble: Preamble,
    formatter: SettingFormatter,
}

impl SettingsDocument {
    pub fn new(preamble: Preamble, formatter: SettingFormatter) -> Self {
        Self {
            preamble,
            formatter,
        }
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn formatter(&self) -> &SettingFormatter {
        &self.formatter
    }

    /// Render the full document for a settings collection in registry order.
    pub fn render<'a, I>(&self, settings: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Setting>,
    {
        let ordered = order_by_section(settings);
        let mut out = self.preamble.render()?;
        out.push_str(&self.formatter.format_settings(&ordered)?);
        Ok(out)
    }

    /// Render and replace `path` in one step.
    ///
    /// The document is rendered completely before anything touches the
    /// filesystem, then written to a temp file next to `path` and renamed over
    /// it, so a failed build never leaves a truncated reference behind.
    pub fn write<'a, I>(&self, settings: I, path: &Path) -> Result<()>
    where
        I: IntoIterator<Item = &'a Setting>,
    {
        let settings: Vec<&Setting> = settings.into_iter().collect();
        let content = self.render(settings.iter().copied())?;
        write_atomic(path, content.as_bytes())?;

        tracing::info!(path = %path.display(), settings = settings.len(), "Wrote settings reference");
        Ok(())
    }

    /// Whether `path` already holds exactly what [`render`](Self::render) produces.
    pub fn is_current<'a, I>(&self, settings: I, path: &Path) -> Result<bool>
    where
        I: IntoIterator<Item = &'a Setting>,
    {
        let content = self.render(settings)?;
        match std::fs::read_to_string(path) {
            Ok(existing) => Ok(existing == content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DocsError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let persist_err = |source: std::io::Error| DocsError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    file.write_all(bytes).map_err(persist_err)?;
    file.as_file().sync_all().map_err(persist_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(persist_err)?;
    }

    file.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::ComputedDefault;

    const GUNICORN_HEAD: &str = r#".. Please update gunicorn/config.py instead.

.. _settings:

Settings
========

This is an exhaustive list of settings for Gunicorn. Some settings are only
able to be set from a configuration file. The setting name is what should be
used in the configuration file. The command line arguments are listed as well
for reference on setting at the command line.

.. note::

    Settings can be specified by using environment variable
    ``GUNICORN_CMD_ARGS``. All available command line arguments can be used.
    For example, to specify the bind address and number of workers::

        $ GUNICORN_CMD_ARGS="--bind=127.0.0.1 --workers=3" gunicorn app:app

    .. versionadded:: 19.7

"#;

    #[test]
    fn test_default_preamble() {
        assert_eq!(Preamble::default().render().unwrap(), GUNICORN_HEAD);
    }

    #[test]
    fn test_preamble_without_version_note() {
        let preamble = Preamble {
            project: "Acme".to_string(),
            env_var: "ACME_ARGS".to_string(),
            binary: "acme".to_string(),
            version_added: None,
            ..Preamble::default()
        };
        let rendered = preamble.render().unwrap();
        assert!(rendered.contains("list of settings for Acme."));
        assert!(rendered.contains("``ACME_ARGS``"));
        assert!(rendered.ends_with(
            "        $ ACME_ARGS=\"--bind=127.0.0.1 --workers=3\" acme app:app\n\n"
        ));
        assert!(!rendered.contains("versionadded"));
    }

    #[test]
    fn test_preamble_from_partial_toml() {
        let preamble: Preamble = toml::from_str("project = \"Acme\"\nenv-var = \"ACME_ARGS\"")
            .expect("partial preamble table should parse");
        assert_eq!(preamble.project, "Acme");
        assert_eq!(preamble.env_var, "ACME_ARGS");
        assert_eq!(preamble.binary, "gunicorn");
    }

    fn sample_settings() -> Vec<Setting> {
        vec![
            Setting::new("workers", "Worker Processes")
                .with_cli(["-w", "--workers"])
                .with_meta("INT")
                .with_default(1_i64)
                .with_desc("The number of worker processes."),
            Setting::new("bind", "Server Socket")
                .with_cli(["-b", "--bind"])
                .with_meta("ADDRESS")
                .with_default(crate::Literal::List(vec!["127.0.0.1:8000".into()]))
                .with_desc("The socket to bind."),
        ]
    }

    #[test]
    fn test_render_starts_with_preamble_then_sorted_sections() {
        let settings = sample_settings();
        let doc = SettingsDocument::default().render(&settings).unwrap();

        let body = doc.strip_prefix(GUNICORN_HEAD).unwrap();
        assert!(body.starts_with("Server Socket\n-------------\n\n.. _bind:\n\n"));
        assert!(body.find("Server Socket").unwrap() < body.find("Worker Processes").unwrap());
        assert!(body.ends_with("The number of worker processes.\n\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let settings = sample_settings();
        let document = SettingsDocument::default();
        assert_eq!(
            document.render(&settings).unwrap(),
            document.render(&settings).unwrap()
        );
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        let settings = sample_settings();
        let document = SettingsDocument::default();
        document.write(&settings, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document.render(&settings).unwrap());
        assert!(document.is_current(&settings, &path).unwrap());
    }

    #[test]
    fn test_failed_render_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, "previous build").unwrap();

        let settings = vec![Setting::new("post_fork", "Server Hooks").with_default(
            ComputedDefault::in_file("post_fork", dir.path().join("missing.py")),
        )];
        let result = SettingsDocument::default().write(&settings, &path);

        assert!(matches!(result, Err(DocsError::SourceUnavailable { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous build");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join(SETTINGS_FILENAME);
        let result = SettingsDocument::default().write(&sample_settings(), &path);
        assert!(matches!(result, Err(DocsError::Persist { .. })));
    }

    #[test]
    fn test_is_current_detects_stale_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        let settings = sample_settings();
        let document = SettingsDocument::default();

        assert!(!document.is_current(&settings, &path).unwrap());
        std::fs::write(&path, "old").unwrap();
        assert!(!document.is_current(&settings, &path).unwrap());
    }
}
