//! Wiring into a documentation host's build lifecycle.
//!
//! The host owns the build: it decides when `builder-inited` fires and where
//! the documentation sources live. [`SettingsExtension::setup`] registers the
//! settings generator on that event and adds the `issue` / `pr` roles. Every
//! input is handed over explicitly, so the generator never consults global
//! configuration state.

use std::path::{Path, PathBuf};

use crate::document::{SettingsDocument, SETTINGS_FILENAME};
use crate::error::Result;
use crate::registry::Registry;
use crate::roles::{ReferenceRole, ISSUE_ROLE, PULL_REQUEST_ROLE};

/// Build-lifecycle events a hook can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildEvent {
    /// The builder is set up and sources have not been read yet.
    BuilderInited,
}

impl BuildEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BuildEvent::BuilderInited => "builder-inited",
        }
    }
}

/// What the host exposes to hooks.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Documentation source directory.
    pub srcdir: PathBuf,
}

impl BuildContext {
    pub fn new(srcdir: impl Into<PathBuf>) -> Self {
        Self {
            srcdir: srcdir.into(),
        }
    }
}

/// A lifecycle hook. Returning an error fails the build.
pub type BuildHook = Box<dyn Fn(&BuildContext) -> Result<()>>;

/// The registration surface of a documentation host.
pub trait DocsHost {
    /// Run `hook` whenever `event` fires.
    fn connect(&mut self, event: BuildEvent, hook: BuildHook);

    /// Make `role` available in markup as `` :name:`token` ``.
    fn add_role(&mut self, name: &str, role: ReferenceRole);
}

/// Generates the settings reference on `builder-inited` and provides the reference roles.
#[derive(Debug, Clone)]
pub struct SettingsExtension {
    registry: Registry,
    document: SettingsDocument,
    output_name: String,
}

impl SettingsExtension {
    pub fn new(registry: Registry, document: SettingsDocument) -> Self {
        Self {
            registry,
            document,
            output_name: SETTINGS_FILENAME.to_string(),
        }
    }

    /// Override the generated file's name (default `settings.rst`).
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn output_path(&self, srcdir: &Path) -> PathBuf {
        srcdir.join(&self.output_name)
    }

    /// Write the reference into the build's source directory.
    pub fn generate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        let path = self.output_path(&ctx.srcdir);
        self.document.write(self.registry.settings(), &path)?;
        Ok(path)
    }

    /// Whether the reference in the build's source directory is up to date.
    pub fn check(&self, ctx: &BuildContext) -> Result<bool> {
        self.document
            .is_current(self.registry.settings(), &self.output_path(&ctx.srcdir))
    }

    /// Register roles and the generation hook with `host`.
    pub fn setup(self, host: &mut dyn DocsHost) {
        host.add_role("issue", ISSUE_ROLE);
        host.add_role("pr", PULL_REQUEST_ROLE);
        host.connect(
            BuildEvent::BuilderInited,
            Box::new(move |ctx: &BuildContext| self.generate(ctx).map(|_| ())),
        );
    }
}
