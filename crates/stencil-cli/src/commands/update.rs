//! `stencil update`: overwrite a stored template from a JSON payload.

use stencil_core::domain::TemplateId;

use crate::{
    cli::{GlobalArgs, UpdateArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{decode_payload, open_service, report_outcome};

pub fn execute(
    args: UpdateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let command = decode_payload(&args.payload, args.command_id)?;
    let service = open_service(global, config)?;

    let outcome = service.update(TemplateId::new(args.id), command)?;

    report_outcome(output, &outcome, "Updated")
}
