//! Implementation of the `stencil list` command.

use tracing::debug;

use stencil_core::domain::{Template, TemplateEntity, TemplateType};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::open_service;

pub fn execute(
    args: ListArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = open_service(global, config)?;

    let templates = match args.entity {
        Some(entity) => {
            let entity = TemplateEntity::from(entity);
            let render_type = args.render_type.map(TemplateType::from);
            service.find_by_entity_and_type(entity, render_type)?
        }
        None => service.list()?,
    };
    debug!(count = templates.len(), "Templates listed");

    // The global --output-format json wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if templates.is_empty() {
                output.info("No templates stored")?;
                return Ok(());
            }
            output.header(&format!(
                "{:>4}  {:<24} {:<8} {:<10} {:>7}",
                "ID", "NAME", "ENTITY", "TYPE", "MAPPERS"
            ))?;
            for template in &templates {
                output.print(&table_row(template))?;
            }
        }

        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for template in &templates {
                output.print(&template.to_string())?;
            }
        }

        ListFormat::Csv => {
            output.print("id,name,entity,type,mappers")?;
            for template in &templates {
                output.print(&csv_row(template))?;
            }
        }
    }

    Ok(())
}

fn id_column(template: &Template) -> String {
    template.id.map(|id| id.to_string()).unwrap_or_default()
}

fn type_column(template: &Template) -> &'static str {
    template.render_type.map(|t| t.as_str()).unwrap_or("-")
}

fn table_row(template: &Template) -> String {
    format!(
        "{:>4}  {:<24} {:<8} {:<10} {:>7}",
        id_column(template),
        template.name,
        template.entity.as_str(),
        type_column(template),
        template.mappers.len()
    )
}

fn csv_row(template: &Template) -> String {
    format!(
        "{},{},{},{},{}",
        id_column(template),
        csv_field(&template.name),
        template.entity,
        template.render_type.map(|t| t.as_str()).unwrap_or(""),
        template.mappers.len()
    )
}

/// Quote a field when it contains a separator, quote or line break.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{TemplateId, TemplateMapper};

    fn sample() -> Template {
        Template::new("Loan Reminder", "Dear {client}", TemplateEntity::Loan)
            .with_render_type(Some(TemplateType::Sms))
            .with_mappers(vec![TemplateMapper::new(1, "client", "client.name")])
            .with_id(TemplateId::new(4))
    }

    #[test]
    fn csv_row_has_all_columns() {
        assert_eq!(csv_row(&sample()), "4,Loan Reminder,loan,sms,1");
    }

    #[test]
    fn csv_field_quotes_separators() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn missing_type_renders_as_dash() {
        let template = Template::new("Welcome", "", TemplateEntity::Client);
        assert_eq!(type_column(&template), "-");
        assert!(table_row(&template).contains("client"));
    }
}
