//! `confdoc-ctl expand`: rewrite `:issue:` / `:pr:` roles into explicit links.

use confdoc::RoleSet;

use crate::error::{CtlError, CtlResult};
use crate::output;
use crate::ExpandArgs;

pub(crate) fn handle_expand_command(args: ExpandArgs) -> CtlResult<()> {
    let text = std::fs::read_to_string(&args.file).map_err(|e| CtlError::Read {
        path: args.file.clone(),
        source: e,
    })?;

    output::raw(&RoleSet::standard().expand_inline(&text));
    Ok(())
}
