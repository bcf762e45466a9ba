//! Command handlers, one module per subcommand.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use tracing::debug;

use stencil_adapters::JsonFileStore;
use stencil_core::{
    application::{CommandId, CommandOutcome, JsonCommand, TemplateCommand, TemplateService},
    error::StencilError,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

/// Open the configured store file and wrap it in a service.
pub(crate) fn open_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<TemplateService> {
    let path = config.store_path(global.store.as_ref());
    debug!(path = %path.display(), "Opening template store");

    let store = JsonFileStore::open(&path)?;
    Ok(TemplateService::new(Box::new(store)))
}

/// Where a `--payload` argument points.
#[derive(Debug, PartialEq, Eq)]
enum PayloadSource {
    Stdin,
    File(PathBuf),
    Inline(String),
}

impl PayloadSource {
    fn parse(raw: &str) -> Self {
        if raw == "-" {
            Self::Stdin
        } else if let Some(path) = raw.strip_prefix('@') {
            Self::File(PathBuf::from(path))
        } else {
            Self::Inline(raw.to_owned())
        }
    }
}

/// Resolve a `--payload` argument to its JSON text.
///
/// `-` reads stdin, `@FILE` reads a file, anything else is the JSON itself.
pub(crate) fn read_payload(raw: &str) -> CliResult<String> {
    let text = match PayloadSource::parse(raw) {
        PayloadSource::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_cli_context(|| "failed to read payload from stdin")?;
            buf
        }
        PayloadSource::File(path) => std::fs::read_to_string(&path)
            .with_cli_context(|| format!("failed to read payload file '{}'", path.display()))?,
        PayloadSource::Inline(json) => json,
    };

    if text.trim().is_empty() {
        return Err(CliError::invalid_input("payload is empty"));
    }
    Ok(text)
}

/// Read a `--payload` argument and decode it into a template command.
pub(crate) fn decode_payload(raw: &str, command_id: Option<u64>) -> CliResult<TemplateCommand> {
    let mut json = JsonCommand::parse(&read_payload(raw)?).map_err(StencilError::from)?;
    if let Some(id) = command_id {
        json = json.with_command_id(CommandId::new(id));
    }
    Ok(TemplateCommand::from_json(&json).map_err(StencilError::from)?)
}

/// Print a mutation outcome: JSON when asked for, else a success line.
pub(crate) fn report_outcome(
    output: &OutputManager,
    outcome: &CommandOutcome,
    verb: &str,
) -> CliResult<()> {
    if output.is_json() {
        output.json(outcome)?;
        return Ok(());
    }

    let mut line = match outcome.entity_id() {
        Some(id) => format!("{verb} template {id}"),
        None => format!("{verb} template"),
    };
    if let Some(command_id) = outcome.command_id() {
        line.push_str(&format!(" (command {command_id})"));
    }
    output.success(&line)?;
    Ok(())
}

/// Ask a yes/no question. Without a terminal on stdin the answer is no.
pub(crate) fn confirm(prompt: &str, default: bool) -> CliResult<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }
    prompt_user(prompt, default)
}

#[cfg(feature = "interactive")]
fn prompt_user(prompt: &str, default: bool) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt_user(prompt: &str, default: bool) -> CliResult<bool> {
    use std::io::Write;

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{prompt} {hint} ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(match input.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn payload_source_forms() {
        assert_eq!(PayloadSource::parse("-"), PayloadSource::Stdin);
        assert_eq!(
            PayloadSource::parse("@body.json"),
            PayloadSource::File(PathBuf::from("body.json"))
        );
        assert_eq!(
            PayloadSource::parse("{\"name\": \"x\"}"),
            PayloadSource::Inline("{\"name\": \"x\"}".into())
        );
    }

    #[test]
    fn payload_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, "{\"name\": \"Welcome\"}").unwrap();

        let text = read_payload(&format!("@{}", path.display())).unwrap();
        assert_eq!(text, "{\"name\": \"Welcome\"}");
    }

    #[test]
    fn missing_payload_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let raw = format!("@{}", dir.path().join("absent.json").display());
        assert!(matches!(read_payload(&raw), Err(CliError::IoError { .. })));
    }

    #[test]
    fn blank_payload_is_invalid_input() {
        let err = read_payload("   ").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn decode_payload_carries_command_id() {
        let command = decode_payload(r#"{"name": "Welcome", "entity": 2}"#, Some(77)).unwrap();
        assert_eq!(command.command_id, Some(CommandId::new(77)));
        assert_eq!(command.name.as_deref(), Some("Welcome"));
        assert_eq!(command.entity, Some(2));
    }

    #[test]
    fn malformed_payload_is_user_error() {
        let err = decode_payload("{\"mappers\": 3}", None).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = decode_payload("not json", None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn open_service_uses_cli_store_override() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("nested").join("templates.json");
        let global = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            store: Some(store),
            output_format: crate::cli::OutputFormat::Plain,
        };

        let service = open_service(&global, &AppConfig::default()).unwrap();
        assert!(service.list().unwrap().is_empty());
    }
}
