use crate::commands::generate::EntityArgs;
use crate::commands::new::NewProjectArgs;
use crate::commands::{build, dev, doctor, generate, new, test};
use crate::error::CliError;
use crate::output::OutputSink;
use console::style;
use inquire::{Confirm, InquireError, Select, Text};
use springwell_codegen::{ComponentKind, Database, GenerationOptions, ProjectTemplate};
use springwell_core::CoreError;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    NewProject,
    GenerateComponents,
    RunDev,
    Build,
    RunTests,
    HealthCheck,
    Exit,
}

impl MainMenuItem {
    pub const ALL: [MainMenuItem; 7] = [
        MainMenuItem::NewProject,
        MainMenuItem::GenerateComponents,
        MainMenuItem::RunDev,
        MainMenuItem::Build,
        MainMenuItem::RunTests,
        MainMenuItem::HealthCheck,
        MainMenuItem::Exit,
    ];
}

impl fmt::Display for MainMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainMenuItem::NewProject => "Generate a brand new project",
            MainMenuItem::GenerateComponents => "Generate components (entity, workflow, etc.)",
            MainMenuItem::RunDev => "Run development server",
            MainMenuItem::Build => "Build project",
            MainMenuItem::RunTests => "Run tests",
            MainMenuItem::HealthCheck => "Check project health",
            MainMenuItem::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Menu loop; failures inside an action are reported and the loop continues
pub fn run(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    print_welcome();

    loop {
        let choice = match Select::new("Main Menu", MainMenuItem::ALL.to_vec()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                MainMenuItem::Exit
            }
            Err(e) => return Err(e.into()),
        };

        if choice == MainMenuItem::Exit {
            out.info("Exiting SpringWell CLI. Goodbye!");
            return Ok(());
        }

        if let Err(e) = dispatch(choice, project_dir, out) {
            out.error(&format!("Error: {}", e));
        }
    }
}

fn print_welcome() {
    println!();
    println!("{}", style("Welcome to SpringWell CLI").green().bold());
    println!("{}", style("Your Spring Boot Companion").dim());
}

fn dispatch(
    choice: MainMenuItem,
    project_dir: &Path,
    out: &dyn OutputSink,
) -> Result<(), CliError> {
    match choice {
        MainMenuItem::NewProject => prompt_new_project(project_dir, out),
        MainMenuItem::GenerateComponents => prompt_generate(project_dir, out),
        MainMenuItem::RunDev => prompt_dev(project_dir, out),
        MainMenuItem::Build => build::run(project_dir, out),
        MainMenuItem::RunTests => prompt_tests(project_dir, out),
        MainMenuItem::HealthCheck => doctor::run(project_dir, out),
        MainMenuItem::Exit => Ok(()),
    }
}

fn prompt_new_project(parent_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    out.heading("Generate New Project");

    let name = Text::new("Project name:").with_placeholder("my-service").prompt()?;
    let name = required(&name, "project name")?;

    let mut args = NewProjectArgs::new(name);
    let package = Text::new("Package name:")
        .with_placeholder(&args.resolved_package())
        .with_help_message("Leave blank for the default")
        .prompt()?;
    args.package = Some(package);

    args.template = Select::new(
        "Project template:",
        vec![ProjectTemplate::Basic, ProjectTemplate::AwsTemporalAuth0],
    )
    .prompt()?;
    args.database = Select::new("Database:", Database::ALL.to_vec()).prompt()?;

    new::run(parent_dir, &args, out).map(|_| ())
}

fn prompt_generate(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    out.heading("Generate Components");

    let kind = Select::new("Component to generate:", ComponentKind::ALL.to_vec()).prompt()?;
    let name = Text::new("Component name:").prompt()?;
    let name = required(&name, "component name")?;

    if kind != ComponentKind::Entity {
        return generate::component(project_dir, kind, name, out);
    }

    let fields = Text::new("Fields:")
        .with_placeholder("title:String content:String:nullable")
        .with_help_message("name:type[:nullable], separated by spaces")
        .prompt()?;
    let relations = Text::new("Relationships:")
        .with_placeholder("manyToOne:author:User")
        .with_help_message("type:field:Entity, separated by spaces; leave blank for none")
        .prompt()?;
    let companions = Confirm::new("Also generate repository, service, controller and DTO?")
        .with_default(true)
        .prompt()?;

    let options = if companions {
        GenerationOptions::default()
    } else {
        GenerationOptions::entity_only()
    };
    let args = EntityArgs {
        name: name.to_string(),
        fields,
        relations,
        table: None,
        options,
    };
    generate::entity(project_dir, &args, out)
}

fn prompt_dev(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    out.heading("Run Development Server");

    let port = Text::new("Port:")
        .with_default(&dev::DEFAULT_PORT.to_string())
        .prompt()?;
    let port = parse_port(&port)?;
    let profile = Text::new("Profile:").with_default(dev::DEFAULT_PROFILE).prompt()?;

    dev::run(project_dir, port, profile.trim(), false, out)
}

fn prompt_tests(project_dir: &Path, out: &dyn OutputSink) -> Result<(), CliError> {
    out.heading("Run Tests");

    let name = Text::new("Specific test to run:")
        .with_help_message("Leave blank for all tests")
        .prompt()?;
    test::run(project_dir, Some(name.as_str()), out)
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CoreError::validation(format!("{} is required", what)))
    } else {
        Ok(value)
    }
}

/// Blank input means the default port
pub fn parse_port(input: &str) -> Result<u16, CoreError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(dev::DEFAULT_PORT);
    }
    input
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| CoreError::validation(format!("invalid port '{}'", input)))
}
