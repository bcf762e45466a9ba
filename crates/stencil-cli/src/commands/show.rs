//! `stencil show`: print one template with its mapping rules.

use stencil_core::domain::{Template, TemplateId};

use crate::{
    cli::{GlobalArgs, ShowArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::open_service;

pub fn execute(
    args: ShowArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = open_service(global, config)?;
    let template = service.find_by_id(TemplateId::new(args.id))?;

    if output.is_json() {
        output.json(&template)?;
        return Ok(());
    }

    output.header(&format!("Template {}", args.id))?;
    for line in describe(&template) {
        output.print(&line)?;
    }
    Ok(())
}

/// Human-readable block, one line per field and per mapper.
fn describe(template: &Template) -> Vec<String> {
    let mut lines = vec![
        format!("  Name:    {}", template.name),
        format!("  Entity:  {}", template.entity),
        format!(
            "  Type:    {}",
            template.render_type.map(|t| t.as_str()).unwrap_or("(none)")
        ),
        format!("  Text:    {}", template.text),
    ];

    if template.mappers.is_empty() {
        lines.push("  Mappers: (none)".into());
    } else {
        lines.push("  Mappers:".into());
        for mapper in &template.mappers {
            lines.push(format!(
                "    {}. {} = {}",
                mapper.order, mapper.key, mapper.value
            ));
        }
    }
    lines
}
