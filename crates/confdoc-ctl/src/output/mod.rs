//! Styled terminal output for `confdoc-ctl`.
//!
//! Uses `anstyle` for style definitions and `anstream` for auto-detecting
//! terminal capabilities, so output degrades to plain text when piped.

mod styles;

use std::fmt::Display;
use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{ERROR, HEADER, HINT, SECTION, SUCCESS, WARNING};

/// Green checkmark line.
pub(crate) fn success(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{SUCCESS}✓{SUCCESS:#} {msg}").ok();
}

/// Red error line on stderr.
pub(crate) fn error(msg: impl Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// Yellow warning line on stderr.
pub(crate) fn warning(msg: impl Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{WARNING}! {msg}{WARNING:#}").ok();
}

pub(crate) fn header(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HEADER}{msg}{HEADER:#}").ok();
}

/// "  Label: value" with the label bolded.
pub(crate) fn label(name: impl Display, value: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {HEADER}{name}:{HEADER:#} {value}").ok();
}

/// One row of the section listing: name and setting count.
pub(crate) fn section_row(name: &str, count: usize) {
    let mut out = anstream::stdout().lock();
    let noun = if count == 1 { "setting" } else { "settings" };
    writeln!(out, "  • {SECTION}{name}{SECTION:#} {HINT}({count} {noun}){HINT:#}").ok();
}

/// Dimmed guidance text.
pub(crate) fn hint(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HINT}{msg}{HINT:#}").ok();
}

/// Unstyled text, written as-is (no trailing newline added).
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    out.write_all(text.as_bytes()).ok();
}
