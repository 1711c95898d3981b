//! A minimal documentation host: collects hooks and roles, then fires events.

use std::fmt;

use confdoc::{BuildContext, BuildEvent, BuildHook, DocsHost, ReferenceRole, RoleSet};

#[derive(Default)]
pub(crate) struct LocalHost {
    hooks: Vec<(BuildEvent, BuildHook)>,
    roles: RoleSet,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Run every hook connected to `event`, in registration order.
    ///
    /// The first failing hook aborts the build.
    pub fn emit(&self, event: BuildEvent, ctx: &BuildContext) -> confdoc::Result<()> {
        for (registered, hook) in &self.hooks {
            if *registered == event {
                tracing::debug!(event = event.name(), srcdir = %ctx.srcdir.display(), "Running build hook");
                hook(ctx)?;
            }
        }
        Ok(())
    }
}

impl DocsHost for LocalHost {
    fn connect(&mut self, event: BuildEvent, hook: BuildHook) {
        self.hooks.push((event, hook));
    }

    fn add_role(&mut self, name: &str, role: ReferenceRole) {
        tracing::debug!(role = name, label = role.label(), "Registered role");
        self.roles.add(name, role);
    }
}

impl fmt::Debug for LocalHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalHost")
            .field("hooks", &self.hooks.len())
            .field("roles", &self.roles)
            .finish()
    }
}
