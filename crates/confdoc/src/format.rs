//! Per-setting rendering.
//!
//! Each setting becomes a self-contained reStructuredText block:
//!
//! ```text
//! .. _worker-connections:
//!
//! ``worker_connections``
//! ~~~~~~~~~~~~~~~~~~~~~~
//!
//! **Command line:** ``--worker-connections INT``
//!
//! **Default:** ``1000``
//!
//! The maximum number of simultaneous clients.
//!
//!
//! ```
//!
//! Sections use a `-` underline; setting names use `~`, four characters wider
//! than the name to cover the inline-literal markers.

use crate::error::{DocsError, Result};
use crate::setting::{ComputedDefault, DefaultValue, Setting};
use crate::source::split_lines;

/// Code-block language for computed default sources.
pub const DEFAULT_CODE_LANGUAGE: &str = "python";

const SECTION_UNDERLINE: char = '-';
const SETTING_UNDERLINE: char = '~';
const LITERAL_MARKERS_WIDTH: usize = 4;
const SOURCE_INDENT: &str = "    ";

/// Renders settings and section headings.
#[derive(Debug, Clone)]
pub struct SettingFormatter {
    code_language: String,
}

impl Default for SettingFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LANGUAGE)
    }
}

impl SettingFormatter {
    pub fn new(code_language: impl Into<String>) -> Self {
        Self {
            code_language: code_language.into(),
        }
    }

    pub fn code_language(&self) -> &str {
        &self.code_language
    }

    /// Render an ordered sequence, emitting a heading wherever the section changes.
    pub fn format_settings(&self, ordered: &[&Setting]) -> Result<String> {
        let mut out = String::new();
        let mut previous: Option<&Setting> = None;

        for &setting in ordered {
            out.push_str(&self.format_entry(setting, previous)?);
            previous = Some(setting);
        }

        Ok(out)
    }

    /// Render one setting, preceded by a section heading when it opens a new section.
    pub fn format_entry(&self, setting: &Setting, previous: Option<&Setting>) -> Result<String> {
        let opens_section = previous.map_or(true, |prev| prev.section != setting.section);

        let mut out = String::new();
        if opens_section {
            tracing::debug!(section = %setting.section, "Rendering section");
            out.push_str(&section_heading(&setting.section));
        }
        out.push_str(&self.format_setting(setting)?);
        Ok(out)
    }

    /// Render a setting's block: anchor, title, command line, default, description.
    pub fn format_setting(&self, setting: &Setting) -> Result<String> {
        let mut lines: Vec<String> = vec![format!(".. _{}:\n", setting.anchor())];

        lines.push(format!("``{}``", setting.name));
        lines.push(underline(
            SETTING_UNDERLINE,
            setting.name.chars().count() + LITERAL_MARKERS_WIDTH,
        ));
        lines.push(String::new());

        if let Some(cli) = cli_line(setting) {
            lines.push(format!("**Command line:** {cli}"));
            lines.push(String::new());
        }

        let default = self.default_value(setting)?;
        lines.push(format!("**Default:** {default}"));
        lines.push(String::new());

        lines.push(setting.desc.clone());
        lines.push(String::new());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }

    fn default_value(&self, setting: &Setting) -> Result<String> {
        match &setting.default {
            DefaultValue::Computed(computed) => self.code_block(setting, computed),
            DefaultValue::Literal(literal) if literal.is_empty_str() => Ok("``''``".to_string()),
            DefaultValue::Literal(literal) => Ok(format!("``{literal}``")),
        }
    }

    fn code_block(&self, setting: &Setting, computed: &ComputedDefault) -> Result<String> {
        let source = computed
            .source_text()
            .map_err(|e| DocsError::SourceUnavailable {
                setting: setting.name.clone(),
                routine: computed.routine.clone(),
                reason: e.to_string(),
            })?;

        let indented: Vec<String> = split_lines(&source)
            .into_iter()
            .map(|line| format!("{SOURCE_INDENT}{line}"))
            .collect();

        Ok(format!(
            "\n\n.. code-block:: {}\n\n{}",
            self.code_language,
            indented.join("\n")
        ))
    }
}

/// Section title with a matching `-` underline and a trailing blank line.
pub fn section_heading(section: &str) -> String {
    format!(
        "{section}\n{}\n\n",
        underline(SECTION_UNDERLINE, section.chars().count())
    )
}

/// The "Command line" value, or `None` when the setting has no flags.
pub fn cli_line(setting: &Setting) -> Option<String> {
    if setting.cli.is_empty() {
        return None;
    }

    let rendered: Vec<String> = match setting.meta() {
        Some(meta) => setting
            .cli
            .iter()
            .map(|flag| format!("``{flag} {meta}``"))
            .collect(),
        None => setting.cli.iter().map(|flag| format!("``{flag}``")).collect(),
    };
    Some(rendered.join(" or "))
}

fn underline(c: char, width: usize) -> String {
    c.to_string().repeat(width)
}
