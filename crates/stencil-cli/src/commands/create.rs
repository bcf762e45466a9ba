//! `stencil create`: store a new template from a JSON payload.

use crate::{
    cli::{CreateArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{decode_payload, open_service, report_outcome};

pub fn execute(
    args: CreateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let command = decode_payload(&args.payload, args.command_id)?;
    let service = open_service(global, config)?;

    let outcome = service.create(command)?;

    report_outcome(output, &outcome, "Created")
}
