//! Style constants and clap help styling configuration.

use anstyle::{AnsiColor, Color, Effects, Style};

/// Green: written files, up-to-date checks.
pub(crate) const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Red: build failures.
pub(crate) const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Yellow: stale output, config fallbacks.
pub(crate) const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Bold: headers and labels.
pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

/// Cyan: section names in listings.
pub(crate) const SECTION: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Dimmed: hints and counts.
pub(crate) const HINT: Style = Style::new().effects(Effects::DIMMED);

/// Clap help styles matching the palette above.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let heading = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)))
        .effects(Effects::BOLD);

    clap::builder::Styles::styled()
        .header(heading)
        .usage(heading)
        .literal(SECTION)
        .placeholder(SECTION)
        .error(ERROR.effects(Effects::BOLD))
        .valid(SUCCESS)
        .invalid(WARNING)
}
