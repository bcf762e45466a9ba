//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_core::domain::{TemplateEntity, TemplateType};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template catalogue for client, loan and group messages",
    long_about = "Stencil stores named text templates bound to a business entity \
                  and a render type, each with an ordered list of mapping rules.",
    after_help = "EXAMPLES:\n\
        \x20 stencil create --payload '{\"name\": \"Loan Reminder\", \"text\": \"Dear {client}\"}'\n\
        \x20 stencil update 1 --payload @reminder.json\n\
        \x20 stencil list --entity loan --type sms\n\
        \x20 stencil remove 1 --yes",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List stored templates.
    #[command(
        visible_alias = "ls",
        about = "List templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --entity client\n\
            \x20 stencil list --entity loan --type sms --format json"
    )]
    List(ListArgs),

    /// Show one template.
    #[command(about = "Show a template")]
    Show(ShowArgs),

    /// Create a template from a JSON payload.
    #[command(
        visible_alias = "new",
        about = "Create a template",
        after_help = "PAYLOAD FIELDS:\n\
            \x20 name, text        strings\n\
            \x20 entity            0 = client, 1 = loan, 2 = group\n\
            \x20 type              0 = document, 2 = sms\n\
            \x20 mappers           [{\"mappersorder\": 1, \"mapperskey\": \"k\", \"mappersvalue\": \"v\"}]"
    )]
    Create(CreateArgs),

    /// Overwrite a template from a JSON payload.
    #[command(about = "Update a template")]
    Update(UpdateArgs),

    /// Delete a template.
    #[command(visible_alias = "rm", about = "Remove a template")]
    Remove(RemoveArgs),

    /// Initialise a Stencil configuration file.
    #[command(about = "Initialise configuration")]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get store.path\n\
            \x20 stencil config list"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only templates for this entity.
    #[arg(short = 'e', long = "entity", value_enum, help = "Filter by entity")]
    pub entity: Option<EntityArg>,

    /// Only templates of this render type. Requires `--entity`.
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        requires = "entity",
        help = "Filter by render type (with --entity)"
    )]
    pub render_type: Option<TypeArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Template id.
    #[arg(value_name = "ID")]
    pub id: u64,
}

// ── create / update / remove ──────────────────────────────────────────────────

/// Arguments for `stencil create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// JSON payload: inline text, `@FILE`, or `-` for stdin.
    #[arg(short = 'p', long = "payload", value_name = "JSON")]
    pub payload: String,

    /// Identifier of the originating command, echoed in the outcome.
    #[arg(long = "command-id", value_name = "N")]
    pub command_id: Option<u64>,
}

/// Arguments for `stencil update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Template id.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// JSON payload: inline text, `@FILE`, or `-` for stdin.
    #[arg(short = 'p', long = "payload", value_name = "JSON")]
    pub payload: String,

    /// Identifier of the originating command, echoed in the outcome.
    #[arg(long = "command-id", value_name = "N")]
    pub command_id: Option<u64>,
}

/// Arguments for `stencil remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Template id.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Remove without asking")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `store.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Entity tags accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EntityArg {
    Client,
    Loan,
    Group,
}

impl From<EntityArg> for TemplateEntity {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Client => TemplateEntity::Client,
            EntityArg::Loan => TemplateEntity::Loan,
            EntityArg::Group => TemplateEntity::Group,
        }
    }
}

/// Render types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TypeArg {
    /// Also accepted as `doc`.
    #[value(alias = "doc")]
    Document,
    Sms,
}

impl From<TypeArg> for TemplateType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Document => TemplateType::Document,
            TypeArg::Sms => TemplateType::Sms,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn value_enums_map_to_domain() {
        assert_eq!(TemplateEntity::from(EntityArg::Group), TemplateEntity::Group);
        assert_eq!(TemplateType::from(TypeArg::Sms), TemplateType::Sms);
    }

    #[test]
    fn parse_update_command() {
        let cli = Cli::parse_from([
            "stencil",
            "update",
            "3",
            "--payload",
            "{}",
            "--command-id",
            "9",
        ]);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, 3);
                assert_eq!(args.command_id, Some(9));
            }
            other => panic!("expected Update command, got {other:?}"),
        }
    }

    #[test]
    fn doc_alias() {
        let cli = Cli::parse_from(["stencil", "list", "-e", "loan", "-t", "doc"]);
        if let Commands::List(args) = cli.command {
            assert_eq!(args.render_type, Some(TypeArg::Document));
        } else {
            panic!("expected List command");
        }
    }

    #[test]
    fn type_filter_requires_entity() {
        let result = Cli::try_parse_from(["stencil", "list", "--type", "sms"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stencil", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
