mod build_tool;
mod commands;
mod error;
mod interactive;
mod logging;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::generate::EntityArgs;
use commands::new::NewProjectArgs;
use commands::{build, dev, doctor, generate, new, test};
use error::CliError;
use output::OutputSink;
use springwell_codegen::{ComponentKind, Database, GenerationOptions, ProjectTemplate};
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "springwell")]
#[command(version, about = "Spring Boot scaffolding and code generation CLI")]
struct Cli {
    /// Suppress everything except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit one JSON object per output line
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Spring Boot project
    New {
        /// Project name
        name: String,

        /// Java package name (default: derived from name)
        #[arg(short, long)]
        package: Option<String>,

        /// Database type (postgres, mysql, h2)
        #[arg(long, default_value = "postgres")]
        db: String,

        /// Authentication type (jwt, oauth2, basic, auth0)
        #[arg(long, default_value = "jwt")]
        auth: String,

        /// Comma-separated list of features to include
        #[arg(long, default_value = "swagger,actuator")]
        features: String,

        /// Project template to use (basic, aws-temporal-auth0)
        #[arg(long, default_value = "basic")]
        template: String,
    },

    /// Run application with hot reloading
    Dev {
        /// Port to run on
        #[arg(long, default_value_t = dev::DEFAULT_PORT)]
        port: u16,

        /// Spring profile to use
        #[arg(long, default_value = dev::DEFAULT_PROFILE)]
        profile: String,

        /// Enable debug logging in the application
        #[arg(long)]
        debug: bool,
    },

    /// Build the application
    Build,

    /// Run tests
    Test {
        /// Specific test to run
        #[arg(long)]
        test: Option<String>,
    },

    /// Check project health and suggest fixes
    Doctor,

    /// Generate code components
    #[command(alias = "g")]
    Generate {
        #[command(subcommand)]
        generate_command: GenerateCommands,
    },

    /// Run the CLI in interactive mode
    #[command(alias = "i")]
    Interactive,
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Generate an entity and its related components
    Entity(EntityCommand),

    /// Generate a REST controller
    Controller { name: String },

    /// Generate a service interface and implementation
    Service { name: String },

    /// Generate a repository interface
    Repository { name: String },

    /// Generate a DTO class
    Dto { name: String },

    /// Generate a Temporal workflow and its activity
    Workflow { name: String },

    /// Generate a Temporal activity
    Activity { name: String },
}

#[derive(Args)]
struct EntityCommand {
    /// Entity name
    name: String,

    /// Field definitions (format: "name:type[:modifier]")
    #[arg(short, long, default_value = "")]
    fields: String,

    /// Relationship definitions (format: "type:field:entity")
    #[arg(short, long, default_value = "")]
    relations: String,

    /// Database table name (default: derived from entity name)
    #[arg(short, long)]
    table: Option<String>,

    /// Add auditing fields (created/updated timestamps)
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    audit: bool,

    /// Use Lombok annotations
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    lombok: bool,

    /// Generate DTO classes
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    dto: bool,

    /// Skip repository generation
    #[arg(long)]
    no_repository: bool,

    /// Skip service generation
    #[arg(long)]
    no_service: bool,

    /// Skip controller generation
    #[arg(long)]
    no_controller: bool,
}

impl From<EntityCommand> for EntityArgs {
    fn from(cmd: EntityCommand) -> Self {
        Self {
            name: cmd.name,
            fields: cmd.fields,
            relations: cmd.relations,
            table: cmd.table,
            options: GenerationOptions {
                audit: cmd.audit,
                lombok: cmd.lombok,
                dto: cmd.dto,
                repository: !cmd.no_repository,
                service: !cmd.no_service,
                controller: !cmd.no_controller,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let out = output::sink(cli.json, cli.quiet);
    let log_config = logging::LoggingConfig::from_flags(cli.verbose, cli.json, cli.no_color);
    if let Err(e) = logging::init_logging(&log_config) {
        out.warning(&e.to_string());
    }

    let result = std::env::current_dir()
        .map_err(CliError::from)
        .and_then(|cwd| execute(cli.command, &cwd, out.as_ref()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out.error(&e.to_string());
            tracing::debug!(error = ?e, "command failed");
            ExitCode::from(exit_status(e.exit_code()))
        }
    }
}

/// Clamp an exit code into the range a process can report
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

fn execute(command: Commands, cwd: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    match command {
        Commands::New {
            name,
            package,
            db,
            auth,
            features,
            template,
        } => {
            let args = NewProjectArgs {
                name,
                package,
                database: db.parse::<Database>()?,
                auth,
                features,
                template: template.parse::<ProjectTemplate>()?,
            };
            new::run(cwd, &args, out)?;
        }
        Commands::Dev {
            port,
            profile,
            debug,
        } => dev::run(cwd, port, &profile, debug, out)?,
        Commands::Build => build::run(cwd, out)?,
        Commands::Test { test: name } => test::run(cwd, name.as_deref(), out)?,
        Commands::Doctor => doctor::run(cwd, out)?,
        Commands::Generate { generate_command } => {
            let (kind, name) = match generate_command {
                GenerateCommands::Entity(cmd) => {
                    return generate::entity(cwd, &EntityArgs::from(cmd), out);
                }
                GenerateCommands::Controller { name } => (ComponentKind::Controller, name),
                GenerateCommands::Service { name } => (ComponentKind::Service, name),
                GenerateCommands::Repository { name } => (ComponentKind::Repository, name),
                GenerateCommands::Dto { name } => (ComponentKind::Dto, name),
                GenerateCommands::Workflow { name } => (ComponentKind::Workflow, name),
                GenerateCommands::Activity { name } => (ComponentKind::Activity, name),
            };
            generate::component(cwd, kind, &name, out)?;
        }
        Commands::Interactive => interactive::run(cwd, out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_entity_flags() {
        let cli = parse(&[
            "springwell",
            "g",
            "entity",
            "BlogPost",
            "-f",
            "title:String content:String:nullable",
            "-r",
            "manyToOne:author:User",
            "--audit=false",
            "--no-service",
        ]);
        let Commands::Generate {
            generate_command: GenerateCommands::Entity(cmd),
        } = cli.command
        else {
            panic!("expected generate entity");
        };

        let args = EntityArgs::from(cmd);
        assert_eq!(args.name, "BlogPost");
        assert_eq!(args.relations, "manyToOne:author:User");
        assert!(!args.options.audit);
        assert!(args.options.lombok);
        assert!(args.options.dto);
        assert!(!args.options.service);
        assert!(args.options.repository);
        assert!(args.table.is_none());
    }

    #[test]
    fn test_bare_boolean_flag_means_true() {
        let cli = parse(&["springwell", "generate", "entity", "Tag", "--dto"]);
        let Commands::Generate {
            generate_command: GenerateCommands::Entity(cmd),
        } = cli.command
        else {
            panic!("expected generate entity");
        };
        assert!(cmd.dto);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["springwell", "doctor", "--json", "-q"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Doctor));
    }

    #[test]
    fn test_new_defaults() {
        let cli = parse(&["springwell", "new", "shop"]);
        let Commands::New {
            db,
            auth,
            features,
            template,
            package,
            ..
        } = cli.command
        else {
            panic!("expected new");
        };
        assert_eq!(db, "postgres");
        assert_eq!(auth, "jwt");
        assert_eq!(features, "swagger,actuator");
        assert_eq!(template, "basic");
        assert!(package.is_none());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(1), 1);
        assert_eq!(exit_status(42), 42);
        assert_eq!(exit_status(0), 1);
        assert_eq!(exit_status(-1), 1);
        assert_eq!(exit_status(300), 1);
    }
}
