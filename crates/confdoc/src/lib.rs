//! Settings reference generation for documentation builds.
//!
//! Turns a registry of configuration-setting descriptors into the
//! reStructuredText `settings.rst` reference page, and provides the `:issue:`
//! and `:pr:` inline roles used throughout the rest of the documentation.
//!
//! ## Architecture
//!
//! ```text
//! Registry export / Vec<Setting>  →  order_by_section  →  SettingFormatter  →  SettingsDocument
//! (yaml/json or in-memory)           (stable by section)   (heading + blocks)   (preamble + atomic write)
//! ```
//!
//! # Modules
//!
//! - [`setting`]: Setting descriptor and tagged default value
//! - [`literal`]: Literal default values and their canonical representation
//! - [`source`]: Source-text extraction for computed defaults
//! - [`registry`]: Registry export loading and section ordering
//! - [`format`]: Per-setting and per-section block rendering
//! - [`document`]: Preamble + block assembly and atomic file output
//! - [`roles`]: `:issue:` / `:pr:` reference expanders
//! - [`extension`]: Build-lifecycle hook and role registration against a host

pub mod document;
pub mod error;
pub mod extension;
pub mod format;
pub mod literal;
pub mod registry;
pub mod roles;
pub mod setting;
pub mod source;

pub use document::{Preamble, SettingsDocument, SETTINGS_FILENAME};
pub use error::{DocsError, Result};
pub use extension::{BuildContext, BuildEvent, BuildHook, DocsHost, SettingsExtension};
pub use format::SettingFormatter;
pub use literal::Literal;
pub use registry::{order_by_section, Registry, SectionSummary};
pub use roles::{LinkNode, ReferenceRole, RoleSet, ISSUE_ROLE, PULL_REQUEST_ROLE};
pub use setting::{ComputedDefault, DefaultValue, Setting};
