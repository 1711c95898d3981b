//! `:issue:` and `:pr:` reference roles.
//!
//! Both roles have the same shape: take the token written between the
//! backticks and turn it into a hyperlink whose text is `"<label> <token>"`
//! and whose target is a fixed URI template with the token substituted in.
//! Tokens are never checked against the tracker.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const ISSUE_URI: &str = "https://github.com/benoitc/gunicorn/issues/%s";
const PULL_REQUEST_URI: &str = "https://github.com/benoitc/gunicorn/pull/%s";

/// `:issue:` → "issue 1234" linking to the issue tracker.
pub const ISSUE_ROLE: ReferenceRole = ReferenceRole::new("issue", ISSUE_URI);

/// `:pr:` → "pull request 1234" linking to the pull request.
pub const PULL_REQUEST_ROLE: ReferenceRole = ReferenceRole::new("pull request", PULL_REQUEST_URI);

static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":(?P<name>[A-Za-z0-9][A-Za-z0-9_.+-]*):`(?P<token>(?:[^`\\]|\\.)*)`")
        .expect("role pattern is valid")
});

/// A rendered hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    /// Visible link text.
    pub text: String,
    /// Link target.
    pub refuri: String,
}

impl LinkNode {
    /// reStructuredText anonymous hyperlink: `` `text <uri>`__ ``.
    pub fn to_rst(&self) -> String {
        let text = self
            .text
            .replace('\\', "\\\\")
            .replace('`', "\\`")
            .replace('<', "\\<");
        format!("`{} <{}>`__", text, self.refuri)
    }
}

/// A token → link expander with a fixed label and URI template (`%s` = token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRole {
    label: &'static str,
    uri_template: &'static str,
}

impl ReferenceRole {
    pub const fn new(label: &'static str, uri_template: &'static str) -> Self {
        Self {
            label,
            uri_template,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn uri_template(&self) -> &'static str {
        self.uri_template
    }

    /// Expand the raw role text into a link.
    pub fn expand(&self, text: &str) -> LinkNode {
        let token = unescape(text);
        LinkNode {
            text: format!("{} {}", self.label, token),
            refuri: self.uri_template.replacen("%s", &token, 1),
        }
    }
}

/// Drop markup escapes: `\x` becomes `x`, and an escaped whitespace disappears.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next.is_whitespace() => {}
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

/// Roles known to the host, by the name used in markup.
#[derive(Debug, Clone, Default)]
pub struct RoleSet {
    roles: Vec<(String, ReferenceRole)>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `issue` and `pr`.
    pub fn standard() -> Self {
        let mut roles = Self::new();
        roles.add("issue", ISSUE_ROLE);
        roles.add("pr", PULL_REQUEST_ROLE);
        roles
    }

    /// Register a role; a later registration under the same name wins.
    pub fn add(&mut self, name: impl Into<String>, role: ReferenceRole) {
        let name = name.into();
        self.roles.retain(|(existing, _)| *existing != name);
        self.roles.push((name, role));
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceRole> {
        self.roles
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, role)| role)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|(name, _)| name.as_str())
    }

    /// Rewrite every `` :name:`token` `` of a registered role into a hyperlink.
    ///
    /// Roles that are not registered are left exactly as written.
    pub fn expand_inline(&self, text: &str) -> String {
        ROLE_PATTERN
            .replace_all(text, |caps: &Captures<'_>| match self.get(&caps["name"]) {
                Some(role) => role.expand(&caps["token"]).to_rst(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
