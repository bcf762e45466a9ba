//! `stencil remove`: delete a stored template.

use std::io::{self, IsTerminal};

use stencil_core::domain::TemplateId;

use crate::{
    cli::{GlobalArgs, RemoveArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{confirm, open_service, report_outcome};

pub fn execute(
    args: RemoveArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    // Nobody can answer the prompt, so only --yes may delete.
    if !args.yes && !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "stdin is not a terminal; pass --yes to remove without a prompt",
        ));
    }

    let service = open_service(global, config)?;
    let id = TemplateId::new(args.id);

    // Fails with NotFound before asking anything.
    let template = service.find_by_id(id)?;

    if !args.yes {
        if !global.quiet {
            output.print(&format!("About to remove {template}"))?;
        }
        if !confirm("Remove this template?", false)? {
            return Err(CliError::Cancelled);
        }
    }

    let outcome = service.remove(id)?;
    report_outcome(output, &outcome, "Removed")
}
